//! Vehicle repository interface

use async_trait::async_trait;
use werkstatt_errors::AppResult;

use crate::domain::entities::Vehicle;
use crate::domain::value_objects::{CustomerId, VehicleId};

/// Vehicle repository interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Find a vehicle by id
    async fn find_by_id(&self, id: &VehicleId) -> AppResult<Option<Vehicle>>;

    /// Save a new vehicle
    async fn save(&self, vehicle: &Vehicle) -> AppResult<()>;

    /// Update an existing vehicle
    async fn update(&self, vehicle: &Vehicle) -> AppResult<()>;

    /// Delete a vehicle
    async fn delete(&self, id: &VehicleId) -> AppResult<()>;

    /// All vehicles of one customer, newest first
    async fn list_for_customer(&self, customer_id: &CustomerId) -> AppResult<Vec<Vehicle>>;
}
