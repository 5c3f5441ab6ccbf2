//! Spare part repository interface

use async_trait::async_trait;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::AppResult;

use crate::domain::entities::{Part, PartFilter, StockMovement};
use crate::domain::value_objects::{PartId, Sku};

/// Spare part repository interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartRepository: Send + Sync {
    // ========== CRUD ==========

    /// Find a part by id
    async fn find_by_id(&self, id: &PartId) -> AppResult<Option<Part>>;

    /// Find a part by its number
    async fn find_by_sku(&self, sku: &Sku) -> AppResult<Option<Part>>;

    /// Whether a part with this number exists
    async fn exists_by_sku(&self, sku: &Sku) -> AppResult<bool>;

    /// Save a new part
    async fn save(&self, part: &Part) -> AppResult<()>;

    /// Update an existing part
    async fn update(&self, part: &Part) -> AppResult<()>;

    /// Delete a part
    async fn delete(&self, id: &PartId) -> AppResult<()>;

    /// List parts, ordered by part number
    async fn list(&self, filter: PartFilter, pagination: Pagination)
        -> AppResult<PagedResult<Part>>;

    /// Every part, ordered by part number. Feed for the inventory export.
    async fn list_all(&self) -> AppResult<Vec<Part>>;

    // ========== Movements ==========

    /// Append one movement record
    async fn save_movement(&self, movement: &StockMovement) -> AppResult<()>;

    /// Movement history of a part, newest first
    async fn list_movements(
        &self,
        part_id: &PartId,
        pagination: Pagination,
    ) -> AppResult<PagedResult<StockMovement>>;
}
