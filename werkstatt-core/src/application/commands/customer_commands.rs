//! Customer commands

use werkstatt_errors::AppResult;

use crate::domain::value_objects::CustomerId;

/// Create customer command
#[derive(Debug, Clone)]
pub struct CreateCustomerCommand {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub notes: String,
}

impl CreateCustomerCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_name_fields(
            &self.first_name,
            &self.last_name,
            self.company.as_deref(),
            &self.email,
        )
    }
}

/// Update customer command
#[derive(Debug, Clone)]
pub struct UpdateCustomerCommand {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub notes: String,
}

impl UpdateCustomerCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_name_fields(
            &self.first_name,
            &self.last_name,
            self.company.as_deref(),
            &self.email,
        )
    }
}

/// Delete customer command
#[derive(Debug, Clone)]
pub struct DeleteCustomerCommand {
    pub customer_id: CustomerId,
}

fn validate_name_fields(
    first_name: &str,
    last_name: &str,
    company: Option<&str>,
    email: &str,
) -> AppResult<()> {
    let has_person = !first_name.trim().is_empty() || !last_name.trim().is_empty();
    let has_company = company.is_some_and(|c| !c.trim().is_empty());
    if !has_person && !has_company {
        return Err(werkstatt_errors::AppError::validation(
            "customer needs a person or company name",
        ));
    }

    if first_name.len() > 100 || last_name.len() > 100 {
        return Err(werkstatt_errors::AppError::validation(
            "name must not exceed 100 characters",
        ));
    }

    if !email.is_empty() && !email.contains('@') {
        return Err(werkstatt_errors::AppError::validation(format!(
            "'{}' is not an email address",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_command() -> CreateCustomerCommand {
        CreateCustomerCommand {
            first_name: "Anna".to_string(),
            last_name: "Keller".to_string(),
            company: None,
            phone: String::new(),
            email: String::new(),
            street: String::new(),
            postal_code: String::new(),
            city: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_name_required() {
        let mut cmd = valid_command();
        cmd.first_name = String::new();
        cmd.last_name = "  ".to_string();
        assert!(cmd.validate().is_err());

        // A company name alone is enough.
        cmd.company = Some("Garage Keller GmbH".to_string());
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_email_shape_checked_when_present() {
        let mut cmd = valid_command();
        cmd.email = "not-an-address".to_string();
        assert!(cmd.validate().is_err());

        cmd.email = "anna@example.ch".to_string();
        assert!(cmd.validate().is_ok());
    }
}
