//! Rupiah and date formatting for receipts

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;

use crate::pricing::to_rupiah;

/// Whole Rupiah with dot thousands separators: 1234567 -> "1.234.567"
pub fn format_rupiah(value: Decimal) -> String {
    let amount = to_rupiah(value);
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Summary-row amount: "Rp 9.000", negatives as "-Rp 450"
pub fn format_currency(value: Decimal) -> String {
    if to_rupiah(value) < 0 {
        format!("-Rp {}", format_rupiah(-value))
    } else {
        format!("Rp {}", format_rupiah(value))
    }
}

/// Receipt timestamp in the store's offset: "16/10/2026 14:05"
pub fn format_timestamp(millis: i64, utc_offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
        .unwrap_or_else(|| Utc.fix());
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&offset)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(Decimal::ZERO), "0");
        assert_eq!(format_rupiah(Decimal::from(999)), "999");
        assert_eq!(format_rupiah(Decimal::from(9000)), "9.000");
        assert_eq!(format_rupiah(Decimal::from(1_234_567)), "1.234.567");
        assert_eq!(format_rupiah(Decimal::from(-450)), "-450");
        // rounds at the display boundary
        assert_eq!(format_rupiah(Decimal::new(949050, 2)), "9.491");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::from(9000)), "Rp 9.000");
        assert_eq!(format_currency(Decimal::from(-450)), "-Rp 450");
    }

    #[test]
    fn test_format_timestamp_wib() {
        // 2026-10-16T07:05:00Z
        let millis = 1_792_134_300_000;
        assert_eq!(format_timestamp(millis, 7 * 60), "16/10/2026 14:05");
        assert_eq!(format_timestamp(millis, 0), "16/10/2026 07:05");
    }
}
