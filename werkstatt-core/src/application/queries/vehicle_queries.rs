//! Vehicle queries

use crate::domain::value_objects::{CustomerId, VehicleId};

/// Get vehicle query
#[derive(Debug, Clone)]
pub struct GetVehicleQuery {
    pub vehicle_id: VehicleId,
}

/// List a customer's vehicles query
#[derive(Debug, Clone)]
pub struct ListVehiclesForCustomerQuery {
    pub customer_id: CustomerId,
}
