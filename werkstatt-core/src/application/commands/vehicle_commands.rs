//! Vehicle commands

use werkstatt_errors::AppResult;

use crate::domain::value_objects::{CustomerId, VehicleId};

/// Create vehicle command
#[derive(Debug, Clone)]
pub struct CreateVehicleCommand {
    pub customer_id: CustomerId,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub year: Option<i32>,
}

impl CreateVehicleCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_vehicle_fields(&self.make, &self.model, &self.license_plate, self.year)
    }
}

/// Update vehicle command
#[derive(Debug, Clone)]
pub struct UpdateVehicleCommand {
    pub vehicle_id: VehicleId,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub year: Option<i32>,
}

impl UpdateVehicleCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_vehicle_fields(&self.make, &self.model, &self.license_plate, self.year)
    }
}

/// Delete vehicle command
#[derive(Debug, Clone)]
pub struct DeleteVehicleCommand {
    pub vehicle_id: VehicleId,
}

fn validate_vehicle_fields(
    make: &str,
    model: &str,
    license_plate: &str,
    year: Option<i32>,
) -> AppResult<()> {
    if make.trim().is_empty() {
        return Err(werkstatt_errors::AppError::validation("make cannot be empty"));
    }
    if model.trim().is_empty() {
        return Err(werkstatt_errors::AppError::validation("model cannot be empty"));
    }
    if license_plate.trim().is_empty() {
        return Err(werkstatt_errors::AppError::validation(
            "license plate cannot be empty",
        ));
    }

    if let Some(year) = year {
        if !(1900..=2100).contains(&year) {
            return Err(werkstatt_errors::AppError::validation(format!(
                "{} is not a plausible model year",
                year
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let cmd = CreateVehicleCommand {
            customer_id: CustomerId::new(),
            make: "VW".to_string(),
            model: String::new(),
            license_plate: "ZH 84 912".to_string(),
            vin: None,
            year: None,
        };
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn test_model_year_range() {
        let mut cmd = CreateVehicleCommand {
            customer_id: CustomerId::new(),
            make: "VW".to_string(),
            model: "Golf VII".to_string(),
            license_plate: "ZH 84 912".to_string(),
            vin: None,
            year: Some(2016),
        };
        assert!(cmd.validate().is_ok());

        cmd.year = Some(1850);
        assert!(cmd.validate().is_err());
    }
}
