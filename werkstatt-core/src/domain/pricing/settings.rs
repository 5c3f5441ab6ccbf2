//! Pricing settings value object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use werkstatt_domain_core::Money;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::setting_keys;

/// The two rates every pricing computation needs, read from the settings
/// store and passed in explicitly.
///
/// Construction from raw stored values fails with a `Configuration` error
/// when a rate is missing or not numeric. There are no fallback defaults:
/// a half-configured installation surfaces as an error, not as a silently
/// wrong total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    hourly_rate: Money,
    tax_rate_percent: Decimal,
}

impl PricingSettings {
    pub fn new(hourly_rate: Money, tax_rate_percent: Decimal) -> Self {
        Self {
            hourly_rate,
            tax_rate_percent,
        }
    }

    /// Build from the raw stored values of `default_hourly_rate` and
    /// `tax_rate_percent`.
    pub fn from_raw(hourly_rate: Option<&str>, tax_rate_percent: Option<&str>) -> AppResult<Self> {
        let hourly_rate = parse_rate(setting_keys::DEFAULT_HOURLY_RATE, hourly_rate)?;
        let tax_rate_percent = parse_rate(setting_keys::TAX_RATE_PERCENT, tax_rate_percent)?;

        if tax_rate_percent > Decimal::ONE_HUNDRED {
            return Err(AppError::configuration(format!(
                "setting '{}' cannot exceed 100, got {}",
                setting_keys::TAX_RATE_PERCENT,
                tax_rate_percent
            )));
        }

        Ok(Self::new(Money::new(hourly_rate), tax_rate_percent))
    }

    pub fn hourly_rate(&self) -> Money {
        self.hourly_rate
    }

    pub fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }
}

fn parse_rate(key: &str, raw: Option<&str>) -> AppResult<Decimal> {
    let raw = raw.ok_or_else(|| AppError::configuration(format!("setting '{}' is not set", key)))?;

    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| AppError::configuration(format!("setting '{}' is not numeric: '{}'", key, raw)))?;

    if value.is_sign_negative() {
        return Err(AppError::configuration(format!(
            "setting '{}' cannot be negative, got {}",
            key, value
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use werkstatt_errors::AppError;

    #[test]
    fn test_from_raw_valid() {
        let settings = PricingSettings::from_raw(Some("60"), Some("7.7")).unwrap();
        assert_eq!(settings.hourly_rate().to_string(), "60");
        assert_eq!(settings.tax_rate_percent().to_string(), "7.7");
    }

    #[test]
    fn test_from_raw_trims_whitespace() {
        let settings = PricingSettings::from_raw(Some(" 60.00 "), Some("7.7")).unwrap();
        assert_eq!(settings.hourly_rate().to_string(), "60.00");
    }

    #[test]
    fn test_missing_hourly_rate() {
        let err = PricingSettings::from_raw(None, Some("7.7")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("default_hourly_rate"));
    }

    #[test]
    fn test_missing_tax_rate() {
        let err = PricingSettings::from_raw(Some("60"), None).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("tax_rate_percent"));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = PricingSettings::from_raw(Some("60 CHF"), Some("7.7")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = PricingSettings::from_raw(Some("-1"), Some("7.7")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_tax_rate_above_hundred_rejected() {
        let err = PricingSettings::from_raw(Some("60"), Some("101")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
