//! Vehicle entity

use serde::{Deserialize, Serialize};
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::{AggregateRoot, Entity};

use crate::domain::value_objects::{CustomerId, VehicleId};

/// A customer's vehicle.
///
/// Deletion is refused while any order references the vehicle; the
/// customer cascade in the customer handler is the one exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    customer_id: CustomerId,
    make: String,
    model: String,
    license_plate: String,
    /// Chassis number (VIN)
    vin: Option<String>,
    year: Option<i32>,
    audit_info: AuditInfo,
}

impl Vehicle {
    pub fn new(
        customer_id: CustomerId,
        make: impl Into<String>,
        model: impl Into<String>,
        license_plate: impl Into<String>,
    ) -> Self {
        Self {
            id: VehicleId::new(),
            customer_id,
            make: make.into(),
            model: model.into(),
            license_plate: license_plate.into(),
            vin: None,
            year: None,
            audit_info: AuditInfo::default(),
        }
    }

    /// Rebuild from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: VehicleId,
        customer_id: CustomerId,
        make: String,
        model: String,
        license_plate: String,
        vin: Option<String>,
        year: Option<i32>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            customer_id,
            make,
            model,
            license_plate,
            vin,
            year,
            audit_info,
        }
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn vin(&self) -> Option<&str> {
        self.vin.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    /// "Make Model", the way vehicle pickers label entries.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model).trim().to_string()
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = Some(vin.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn update_details(
        &mut self,
        make: impl Into<String>,
        model: impl Into<String>,
        license_plate: impl Into<String>,
        vin: Option<String>,
        year: Option<i32>,
    ) {
        self.make = make.into();
        self.model = model.into();
        self.license_plate = license_plate.into();
        self.vin = vin;
        self.year = year;
        self.audit_info.touch();
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Vehicle {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
