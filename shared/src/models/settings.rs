//! Application Settings Model (singleton)

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customer::Tier;
use super::store_info::StoreInfo;

/// Supported thermal paper widths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperWidth {
    #[default]
    #[serde(rename = "58mm")]
    Mm58,
    #[serde(rename = "80mm")]
    Mm80,
}

impl PaperWidth {
    /// Character columns in the printer's default font
    pub const fn columns(&self) -> usize {
        match self {
            PaperWidth::Mm58 => 32,
            PaperWidth::Mm80 => 48,
        }
    }
}

/// Settings validation failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be between 0 and 100, got {value}")]
    RateOutOfRange { field: String, value: Decimal },

    #[error("store name is required")]
    StoreNameRequired,
}

/// Global settings read by pricing and receipts
///
/// Passed explicitly into the calculator; nothing mutates it during a
/// checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub store: StoreInfo,
    #[serde(default)]
    pub footer_message: String,
    #[serde(default)]
    pub enable_tax: bool,
    /// Tax percentage (0-100)
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Tier key (lowercase) -> discount percentage (0-100)
    #[serde(default)]
    pub tier_discounts: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub paper_width: PaperWidth,
    /// Offset applied to receipt timestamps
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

fn default_utc_offset() -> i32 {
    // WIB (UTC+7)
    7 * 60
}

impl Default for AppSettings {
    fn default() -> Self {
        let tier_discounts = [
            (Tier::Bronze, Decimal::ZERO),
            (Tier::Silver, Decimal::from(3)),
            (Tier::Gold, Decimal::from(5)),
        ]
        .into_iter()
        .map(|(tier, rate)| (tier.key().to_string(), rate))
        .collect();

        Self {
            store: StoreInfo::default(),
            footer_message: "Terima kasih atas kunjungan Anda".to_string(),
            enable_tax: false,
            tax_rate: Decimal::from(11),
            tier_discounts,
            paper_width: PaperWidth::default(),
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

impl AppSettings {
    /// Discount percentage for a tier; missing keys yield zero
    ///
    /// Map keys are matched case-insensitively against the tier's
    /// canonical lowercase key.
    pub fn tier_discount(&self, tier: Tier) -> Decimal {
        self.tier_discounts
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(tier.key()))
            .map(|(_, rate)| *rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Check rates are percentages and the store has a name
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.store.name.trim().is_empty() {
            return Err(SettingsError::StoreNameRequired);
        }
        check_rate("tax_rate", self.tax_rate)?;
        for (key, rate) in &self.tier_discounts {
            check_rate(&format!("tier_discounts.{}", key), *rate)?;
        }
        Ok(())
    }
}

fn check_rate(field: &str, value: Decimal) -> Result<(), SettingsError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(SettingsError::RateOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_columns() {
        assert_eq!(PaperWidth::Mm58.columns(), 32);
        assert_eq!(PaperWidth::Mm80.columns(), 48);
    }

    #[test]
    fn test_tier_discount_lookup_is_case_insensitive() {
        let mut settings = AppSettings::default();
        settings.tier_discounts.clear();
        settings
            .tier_discounts
            .insert("Gold".to_string(), Decimal::from(7));

        assert_eq!(settings.tier_discount(Tier::Gold), Decimal::from(7));
        assert_eq!(settings.tier_discount(Tier::Silver), Decimal::ZERO);
    }

    #[test]
    fn test_validate() {
        let mut settings = AppSettings::default();
        assert!(settings.validate().is_ok());

        settings.tax_rate = Decimal::from(101);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::RateOutOfRange { .. })
        ));

        settings.tax_rate = Decimal::from(11);
        settings
            .tier_discounts
            .insert("gold".to_string(), Decimal::from(-1));
        assert!(settings.validate().is_err());

        let mut unnamed = AppSettings::default();
        unnamed.store.name = "  ".to_string();
        assert_eq!(unnamed.validate(), Err(SettingsError::StoreNameRequired));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"enable_tax": true}"#).unwrap();
        assert!(settings.enable_tax);
        assert_eq!(settings.paper_width, PaperWidth::Mm58);
        assert_eq!(settings.utc_offset_minutes, 420);
        assert!(settings.tier_discounts.is_empty());
    }
}
