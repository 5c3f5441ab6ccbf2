use std::sync::Arc;

use werkstatt_core::application::commands::{
    SetLogoCommand, SetSettingCommand, UpdateBankDetailsCommand, UpdateCompanyProfileCommand,
};
use werkstatt_core::application::handlers::SettingsHandler;
use werkstatt_core::domain::entities::{setting_keys, BankDetails, CompanyProfile};
use werkstatt_core::domain::repositories::SettingRepository;
use werkstatt_core::infrastructure::persistence::{database, SqliteSettingRepository};
use werkstatt_errors::AppError;

async fn setup() -> SettingsHandler {
    let pool = database::in_memory()
        .await
        .expect("Failed to open in-memory database");
    let setting_repo: Arc<dyn SettingRepository> =
        Arc::new(SqliteSettingRepository::new(pool));
    SettingsHandler::new(setting_repo)
}

async fn set(handler: &SettingsHandler, key: &str, value: &str) {
    handler
        .set(SetSettingCommand {
            key: key.to_string(),
            value: value.to_string(),
            description: String::new(),
        })
        .await
        .expect("Failed to write setting");
}

#[tokio::test]
async fn test_set_overwrites_existing_key() {
    let handler = setup().await;

    handler
        .set(SetSettingCommand {
            key: "default_payment_term_days".to_string(),
            value: "30".to_string(),
            description: "Printed on invoices".to_string(),
        })
        .await
        .expect("Failed to write setting");

    let stored = handler
        .get("default_payment_term_days")
        .await
        .expect("Failed to read setting")
        .expect("Setting missing");
    assert_eq!(stored.value, "30");
    assert_eq!(stored.description, "Printed on invoices");

    set(&handler, "default_payment_term_days", "14").await;

    let stored = handler
        .get("default_payment_term_days")
        .await
        .expect("Failed to read setting")
        .expect("Setting missing");
    assert_eq!(stored.value, "14");

    let all = handler.list().await.expect("Failed to list settings");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_get_unknown_key_is_none() {
    let handler = setup().await;

    let missing = handler
        .get("no_such_key")
        .await
        .expect("Failed to read setting");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_empty_key_rejected() {
    let handler = setup().await;

    let result = handler
        .set(SetSettingCommand {
            key: "   ".to_string(),
            value: "x".to_string(),
            description: String::new(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_company_profile_roundtrip() {
    let handler = setup().await;

    // Unset keys read back as empty strings
    let empty = handler
        .company_profile()
        .await
        .expect("Failed to load profile");
    assert_eq!(empty.name, "");

    handler
        .update_company_profile(UpdateCompanyProfileCommand {
            profile: CompanyProfile {
                name: "Garage Keller GmbH".to_string(),
                street: "Werkstrasse 12".to_string(),
                city: "8952 Schlieren".to_string(),
                phone: "+41 44 730 11 22".to_string(),
                email: "info@garage-keller.ch".to_string(),
                website: "garage-keller.ch".to_string(),
            },
        })
        .await
        .expect("Failed to store profile");

    let profile = handler
        .company_profile()
        .await
        .expect("Failed to load profile");
    assert_eq!(profile.name, "Garage Keller GmbH");
    assert_eq!(profile.city, "8952 Schlieren");
    assert_eq!(profile.website, "garage-keller.ch");
}

#[tokio::test]
async fn test_bank_details_roundtrip() {
    let handler = setup().await;

    handler
        .update_bank_details(UpdateBankDetailsCommand {
            details: BankDetails {
                bank_name: "ZKB".to_string(),
                iban: "CH93 0076 2011 6238 5295 7".to_string(),
                bic: "ZKBKCHZZ80A".to_string(),
            },
        })
        .await
        .expect("Failed to store bank details");

    let details = handler
        .bank_details()
        .await
        .expect("Failed to load bank details");
    assert_eq!(details.bank_name, "ZKB");
    assert_eq!(details.iban, "CH93 0076 2011 6238 5295 7");
    assert_eq!(details.bic, "ZKBKCHZZ80A");
}

#[tokio::test]
async fn test_logo_survives_text_writes_on_the_same_key() {
    let handler = setup().await;

    let logo = vec![0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a];
    handler
        .set_logo(SetLogoCommand { data: logo.clone() })
        .await
        .expect("Failed to store logo");

    let stored = handler.logo().await.expect("Failed to read logo");
    assert_eq!(stored, Some(logo.clone()));

    // A text write on the same key leaves the blob alone
    set(&handler, setting_keys::COMPANY_LOGO, "ignored").await;
    let stored = handler.logo().await.expect("Failed to read logo");
    assert_eq!(stored, Some(logo.clone()));

    // And a second blob write replaces it
    let replacement = vec![0xffu8, 0xd8, 0xff];
    handler
        .set_logo(SetLogoCommand {
            data: replacement.clone(),
        })
        .await
        .expect("Failed to replace logo");
    let stored = handler.logo().await.expect("Failed to read logo");
    assert_eq!(stored, Some(replacement));
}

#[tokio::test]
async fn test_missing_logo_is_none() {
    let handler = setup().await;

    let stored = handler.logo().await.expect("Failed to read logo");
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_pricing_settings_require_both_rates() {
    let handler = setup().await;

    // Nothing configured
    let result = handler.pricing_settings().await;
    assert!(matches!(result, Err(AppError::Configuration(_))));

    // Only the hourly rate
    set(&handler, setting_keys::DEFAULT_HOURLY_RATE, "60").await;
    let result = handler.pricing_settings().await;
    assert!(matches!(result, Err(AppError::Configuration(_))));

    set(&handler, setting_keys::TAX_RATE_PERCENT, "7.7").await;
    let settings = handler
        .pricing_settings()
        .await
        .expect("Failed to load pricing settings");
    assert_eq!(settings.hourly_rate().to_string(), "60");
    assert_eq!(settings.tax_rate_percent().to_string(), "7.7");
}

#[tokio::test]
async fn test_unreadable_rate_is_configuration_error() {
    let handler = setup().await;

    set(&handler, setting_keys::DEFAULT_HOURLY_RATE, "sixty").await;
    set(&handler, setting_keys::TAX_RATE_PERCENT, "7.7").await;

    let result = handler.pricing_settings().await;
    assert!(matches!(result, Err(AppError::Configuration(_))));
}
