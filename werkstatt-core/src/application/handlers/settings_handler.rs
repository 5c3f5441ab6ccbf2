//! Settings handler

use std::sync::Arc;

use tracing::info;
use werkstatt_errors::AppResult;

use crate::domain::entities::{setting_keys, BankDetails, CompanyProfile, Setting};
use crate::domain::pricing::PricingSettings;
use crate::domain::repositories::SettingRepository;

use crate::application::commands::*;

use super::{load_bank_details, load_company_profile, load_pricing_settings};

pub struct SettingsHandler {
    setting_repo: Arc<dyn SettingRepository>,
}

impl SettingsHandler {
    pub fn new(setting_repo: Arc<dyn SettingRepository>) -> Self {
        Self { setting_repo }
    }

    /// Read one entry
    pub async fn get(&self, key: &str) -> AppResult<Option<Setting>> {
        self.setting_repo.get(key).await
    }

    /// Write one entry
    pub async fn set(&self, cmd: SetSettingCommand) -> AppResult<()> {
        cmd.validate()?;

        let setting = Setting::new(cmd.key, cmd.value).with_description(cmd.description);
        self.setting_repo.set(&setting).await?;

        info!("Setting written: {}", setting.key);
        Ok(())
    }

    /// All text entries
    pub async fn list(&self) -> AppResult<Vec<Setting>> {
        self.setting_repo.list().await
    }

    /// The shop's letterhead data
    pub async fn company_profile(&self) -> AppResult<CompanyProfile> {
        load_company_profile(self.setting_repo.as_ref()).await
    }

    /// Replace the letterhead data key by key
    pub async fn update_company_profile(&self, cmd: UpdateCompanyProfileCommand) -> AppResult<()> {
        let profile = cmd.profile;
        let entries = [
            (setting_keys::COMPANY_NAME, profile.name),
            (setting_keys::COMPANY_STREET, profile.street),
            (setting_keys::COMPANY_CITY, profile.city),
            (setting_keys::COMPANY_PHONE, profile.phone),
            (setting_keys::COMPANY_EMAIL, profile.email),
            (setting_keys::COMPANY_WEBSITE, profile.website),
        ];
        for (key, value) in entries {
            self.setting_repo.set(&Setting::new(key, value)).await?;
        }

        info!("Company profile updated");
        Ok(())
    }

    /// The bank details printed on invoices
    pub async fn bank_details(&self) -> AppResult<BankDetails> {
        load_bank_details(self.setting_repo.as_ref()).await
    }

    /// Replace the bank details key by key
    pub async fn update_bank_details(&self, cmd: UpdateBankDetailsCommand) -> AppResult<()> {
        let details = cmd.details;
        let entries = [
            (setting_keys::BANK_NAME, details.bank_name),
            (setting_keys::BANK_IBAN, details.iban),
            (setting_keys::BANK_BIC, details.bic),
        ];
        for (key, value) in entries {
            self.setting_repo.set(&Setting::new(key, value)).await?;
        }

        info!("Bank details updated");
        Ok(())
    }

    /// The letterhead logo, if one was stored
    pub async fn logo(&self) -> AppResult<Option<Vec<u8>>> {
        self.setting_repo.get_blob(setting_keys::COMPANY_LOGO).await
    }

    /// Store the letterhead logo
    pub async fn set_logo(&self, cmd: SetLogoCommand) -> AppResult<()> {
        cmd.validate()?;

        self.setting_repo
            .set_blob(setting_keys::COMPANY_LOGO, &cmd.data)
            .await?;

        info!("Logo stored ({} bytes)", cmd.data.len());
        Ok(())
    }

    /// The hourly rate and tax rate as one value object. Fails with a
    /// configuration error while either rate is missing or unusable.
    pub async fn pricing_settings(&self) -> AppResult<PricingSettings> {
        load_pricing_settings(self.setting_repo.as_ref()).await
    }
}
