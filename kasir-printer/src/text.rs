//! Text utilities for single-byte thermal printers
//!
//! Cheap Bluetooth/serial receipt printers only understand a restricted
//! single-byte character set. This module provides:
//! - Diacritic stripping (NFD decomposition, combining marks removed)
//! - Two-column rows fitted to the paper width
//!
//! No code-page mapping is performed: glyphs that have no diacritic-free
//! form (currency signs, CJK, emoji) pass through unchanged.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritics: "Café Señor" -> "Cafe Senor"
pub fn normalize_text(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Join two strings so the right one ends at `width`
///
/// At least one space always separates them; when the pair does not fit
/// the row overflows `width` instead of truncating either side.
pub fn fit_columns(left: &str, right: &str, width: usize) -> String {
    let left = normalize_text(left);
    let right = normalize_text(right);
    let used = left.chars().count() + right.chars().count();
    let spaces = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(spaces), right)
}
