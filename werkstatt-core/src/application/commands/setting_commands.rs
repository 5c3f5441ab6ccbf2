//! Settings commands

use werkstatt_errors::AppResult;

use crate::domain::entities::{BankDetails, CompanyProfile};

/// Largest accepted logo payload, 2 MB.
const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Set one setting command
#[derive(Debug, Clone)]
pub struct SetSettingCommand {
    pub key: String,
    pub value: String,
    pub description: String,
}

impl SetSettingCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.key.trim().is_empty() {
            return Err(werkstatt_errors::AppError::validation(
                "setting key cannot be empty",
            ));
        }
        if self.key.len() > 100 {
            return Err(werkstatt_errors::AppError::validation(
                "setting key must not exceed 100 characters",
            ));
        }
        Ok(())
    }
}

/// Replace the company letterhead data
#[derive(Debug, Clone)]
pub struct UpdateCompanyProfileCommand {
    pub profile: CompanyProfile,
}

/// Replace the bank details printed on invoices
#[derive(Debug, Clone)]
pub struct UpdateBankDetailsCommand {
    pub details: BankDetails,
}

/// Store the letterhead logo
#[derive(Debug, Clone)]
pub struct SetLogoCommand {
    pub data: Vec<u8>,
}

impl SetLogoCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.data.is_empty() {
            return Err(werkstatt_errors::AppError::validation(
                "logo payload is empty",
            ));
        }
        if self.data.len() > MAX_LOGO_BYTES {
            return Err(werkstatt_errors::AppError::validation(
                "logo payload exceeds 2 MB",
            ));
        }
        Ok(())
    }
}
