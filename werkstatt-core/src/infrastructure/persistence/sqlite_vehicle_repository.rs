//! SQLite vehicle repository

use async_trait::async_trait;
use sqlx::SqlitePool;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::Vehicle;
use crate::domain::repositories::VehicleRepository;
use crate::domain::value_objects::{CustomerId, VehicleId};

use super::converters::vehicle_from_row;
use super::rows::VehicleRow;

const COLUMNS: &str = "id, customer_id, make, model, license_plate, vin, year, \
                       created_at, updated_at";

pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for SqliteVehicleRepository {
    async fn find_by_id(&self, id: &VehicleId) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = ?",
            COLUMNS
        ))
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load vehicle: {}", e)))?;

        row.map(vehicle_from_row).transpose()
    }

    async fn save(&self, vehicle: &Vehicle) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, customer_id, make, model, license_plate, vin, year,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(vehicle.id().0.to_string())
        .bind(vehicle.customer_id().0.to_string())
        .bind(vehicle.make())
        .bind(vehicle.model())
        .bind(vehicle.license_plate())
        .bind(vehicle.vin())
        .bind(vehicle.year())
        .bind(vehicle.audit_info().created_at)
        .bind(vehicle.audit_info().updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save vehicle: {}", e)))?;

        Ok(())
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles SET
                make = ?,
                model = ?,
                license_plate = ?,
                vin = ?,
                year = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(vehicle.make())
        .bind(vehicle.model())
        .bind(vehicle.license_plate())
        .bind(vehicle.vin())
        .bind(vehicle.year())
        .bind(vehicle.audit_info().updated_at)
        .bind(vehicle.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("vehicle does not exist".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &VehicleId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("vehicle does not exist".to_string()));
        }

        Ok(())
    }

    async fn list_for_customer(&self, customer_id: &CustomerId) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE customer_id = ? ORDER BY created_at",
            COLUMNS
        ))
        .bind(customer_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list vehicles: {}", e)))?;

        rows.into_iter().map(vehicle_from_row).collect()
    }
}
