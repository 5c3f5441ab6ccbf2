//! Business logic handlers

use std::collections::HashMap;

use werkstatt_errors::AppResult;

use crate::domain::entities::{setting_keys, BankDetails, CompanyProfile};
use crate::domain::pricing::PricingSettings;
use crate::domain::repositories::SettingRepository;

mod customer_handler;
mod expense_handler;
mod invoice_handler;
mod order_handler;
mod part_handler;
mod report_handler;
mod settings_handler;
mod vehicle_handler;

pub use customer_handler::CustomerHandler;
pub use expense_handler::ExpenseHandler;
pub use invoice_handler::InvoiceHandler;
pub use order_handler::OrderHandler;
pub use part_handler::PartHandler;
pub use report_handler::ReportHandler;
pub use settings_handler::SettingsHandler;
pub use vehicle_handler::VehicleHandler;

/// Assemble the pricing settings from the store. Fails with a
/// configuration error while the rates are not set up.
pub(crate) async fn load_pricing_settings(
    repo: &dyn SettingRepository,
) -> AppResult<PricingSettings> {
    let hourly_rate = repo.get(setting_keys::DEFAULT_HOURLY_RATE).await?;
    let tax_rate = repo.get(setting_keys::TAX_RATE_PERCENT).await?;
    PricingSettings::from_raw(
        hourly_rate.as_ref().map(|s| s.value.as_str()),
        tax_rate.as_ref().map(|s| s.value.as_str()),
    )
}

pub(crate) async fn load_company_profile(
    repo: &dyn SettingRepository,
) -> AppResult<CompanyProfile> {
    let values = settings_map(repo).await?;
    Ok(CompanyProfile {
        name: value_or_empty(&values, setting_keys::COMPANY_NAME),
        street: value_or_empty(&values, setting_keys::COMPANY_STREET),
        city: value_or_empty(&values, setting_keys::COMPANY_CITY),
        phone: value_or_empty(&values, setting_keys::COMPANY_PHONE),
        email: value_or_empty(&values, setting_keys::COMPANY_EMAIL),
        website: value_or_empty(&values, setting_keys::COMPANY_WEBSITE),
    })
}

pub(crate) async fn load_bank_details(repo: &dyn SettingRepository) -> AppResult<BankDetails> {
    let values = settings_map(repo).await?;
    Ok(BankDetails {
        bank_name: value_or_empty(&values, setting_keys::BANK_NAME),
        iban: value_or_empty(&values, setting_keys::BANK_IBAN),
        bic: value_or_empty(&values, setting_keys::BANK_BIC),
    })
}

async fn settings_map(repo: &dyn SettingRepository) -> AppResult<HashMap<String, String>> {
    Ok(repo
        .list()
        .await?
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect())
}

fn value_or_empty(values: &HashMap<String, String>, key: &str) -> String {
    values.get(key).cloned().unwrap_or_default()
}
