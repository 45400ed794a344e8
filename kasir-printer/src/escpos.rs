//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::text::{fit_columns, normalize_text};

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. Text is
/// normalized (diacritics stripped) as it is written.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(1024);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text (normalized, no newline)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(normalize_text(s).as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Spaces fill the gap so the right text ends at the paper width; at
    /// least one space is kept when the pair is too long.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let row = fit_columns(left, right, self.width);
        self.line(&row)
    }

    // === Build ===

    /// Finish and return the byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_reset() {
        let data = EscPosBuilder::new(32).build();
        assert_eq!(data, vec![0x1B, 0x40]);
    }

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.center().bold().line("Toko").bold_off().left().line("isi");

        let data = b.build();
        let parts: [&[u8]; 7] = [
            &[0x1B, 0x40],
            &[0x1B, 0x61, 0x01],
            &[0x1B, 0x45, 0x01],
            b"Toko\n",
            &[0x1B, 0x45, 0x00],
            &[0x1B, 0x61, 0x00],
            b"isi\n",
        ];
        assert_eq!(data, parts.concat());
    }

    #[test]
    fn test_text_is_normalized() {
        let mut b = EscPosBuilder::new(32);
        b.text("Kafé");
        let data = b.build();
        assert_eq!(&data[2..], b"Kafe");
    }

    #[test]
    fn test_line_lr() {
        let mut b = EscPosBuilder::new(20);
        b.line_lr("TOTAL", "9.000");

        let data = b.build();
        let s = String::from_utf8_lossy(&data[2..]);
        assert_eq!(s, format!("TOTAL{}9.000\n", " ".repeat(10)));
    }

    #[test]
    fn test_separators_and_feed() {
        let mut b = EscPosBuilder::new(10);
        b.sep_single().feed(3);

        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("----------\n"));
        assert_eq!(&data[data.len() - 3..], &[0x1B, 0x64, 3]);
    }
}
