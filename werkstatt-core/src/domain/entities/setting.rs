//! Shop settings key-value store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known setting keys.
///
/// The store itself accepts any key; these are the ones the rest of the
/// system reads.
pub mod keys {
    pub const COMPANY_NAME: &str = "company_name";
    pub const COMPANY_STREET: &str = "company_street";
    pub const COMPANY_CITY: &str = "company_city";
    pub const COMPANY_PHONE: &str = "company_phone";
    pub const COMPANY_EMAIL: &str = "company_email";
    pub const COMPANY_WEBSITE: &str = "company_website";
    pub const BANK_NAME: &str = "bank_name";
    pub const BANK_IBAN: &str = "bank_iban";
    pub const BANK_BIC: &str = "bank_bic";
    pub const DEFAULT_HOURLY_RATE: &str = "default_hourly_rate";
    pub const TAX_RATE_PERCENT: &str = "tax_rate_percent";
    pub const DEFAULT_PAYMENT_TERM_DAYS: &str = "default_payment_term_days";
    pub const DEFAULT_DISCOUNT_PERCENT: &str = "default_discount_percent";
    /// Binary payload key for the letterhead logo.
    pub const COMPANY_LOGO: &str = "company_logo";
}

/// One text entry of the settings store. Binary payloads are handled
/// separately and never loaded alongside the text rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Letterhead data of the shop itself, assembled from the settings store.
/// Unset keys come back as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub street: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

/// Payment details printed on invoices, assembled from the settings store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
}
