//! Vehicle handler

use std::sync::Arc;

use tracing::{info, warn};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::Vehicle;
use crate::domain::repositories::{CustomerRepository, OrderRepository, VehicleRepository};
use crate::domain::value_objects::VehicleId;

use crate::application::commands::*;
use crate::application::queries::*;

pub struct VehicleHandler {
    vehicle_repo: Arc<dyn VehicleRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    order_repo: Arc<dyn OrderRepository>,
}

impl VehicleHandler {
    pub fn new(
        vehicle_repo: Arc<dyn VehicleRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        order_repo: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            vehicle_repo,
            customer_repo,
            order_repo,
        }
    }

    /// Create a vehicle for an existing customer
    pub async fn create(&self, cmd: CreateVehicleCommand) -> AppResult<VehicleId> {
        cmd.validate()?;

        if self
            .customer_repo
            .find_by_id(&cmd.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(format!(
                "customer {} does not exist",
                cmd.customer_id
            )));
        }

        let mut vehicle = Vehicle::new(cmd.customer_id, cmd.make, cmd.model, cmd.license_plate);
        if let Some(vin) = cmd.vin.filter(|v| !v.trim().is_empty()) {
            vehicle = vehicle.with_vin(vin);
        }
        if let Some(year) = cmd.year {
            vehicle = vehicle.with_year(year);
        }

        self.vehicle_repo.save(&vehicle).await?;

        info!("Vehicle created: {}", vehicle.id().0);
        Ok(vehicle.id().clone())
    }

    /// Update a vehicle
    pub async fn update(&self, cmd: UpdateVehicleCommand) -> AppResult<()> {
        cmd.validate()?;

        let mut vehicle = self
            .vehicle_repo
            .find_by_id(&cmd.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("vehicle {} does not exist", cmd.vehicle_id))
            })?;

        vehicle.update_details(
            cmd.make,
            cmd.model,
            cmd.license_plate,
            cmd.vin.filter(|v| !v.trim().is_empty()),
            cmd.year,
        );

        self.vehicle_repo.update(&vehicle).await?;

        info!("Vehicle updated: {}", cmd.vehicle_id.0);
        Ok(())
    }

    /// Delete a vehicle. Refused while any order references it.
    pub async fn delete(&self, cmd: DeleteVehicleCommand) -> AppResult<()> {
        let vehicle = self
            .vehicle_repo
            .find_by_id(&cmd.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("vehicle {} does not exist", cmd.vehicle_id))
            })?;

        if self.order_repo.exists_for_vehicle(&cmd.vehicle_id).await? {
            warn!(
                "Refusing to delete vehicle {}: referenced by orders",
                cmd.vehicle_id.0
            );
            return Err(AppError::constraint(format!(
                "vehicle '{}' is referenced by at least one order",
                vehicle.display_name()
            )));
        }

        self.vehicle_repo.delete(&cmd.vehicle_id).await?;

        info!("Vehicle deleted: {}", cmd.vehicle_id.0);
        Ok(())
    }

    /// Get a vehicle
    pub async fn get(&self, query: GetVehicleQuery) -> AppResult<Vehicle> {
        self.vehicle_repo
            .find_by_id(&query.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("vehicle {} does not exist", query.vehicle_id))
            })
    }

    /// All vehicles of one customer
    pub async fn list_for_customer(
        &self,
        query: ListVehiclesForCustomerQuery,
    ) -> AppResult<Vec<Vehicle>> {
        self.vehicle_repo.list_for_customer(&query.customer_id).await
    }
}
