//! Work order repository interface

use async_trait::async_trait;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::AppResult;

use crate::domain::entities::{Order, OrderFilter, OrderLine};
use crate::domain::value_objects::{CustomerId, OrderId, OrderLineId, PartId, VehicleId};

/// Work order repository interface.
///
/// Orders load and list together with their lines. Line rows are written
/// through the dedicated line methods; `update` only touches the order
/// head.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    // ========== CRUD ==========

    /// Find an order with its lines
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<Order>>;

    /// Save a new order together with any lines it already carries
    async fn save(&self, order: &Order) -> AppResult<()>;

    /// Update the order head
    async fn update(&self, order: &Order) -> AppResult<()>;

    /// Delete an order and its lines in one transaction
    async fn delete(&self, id: &OrderId) -> AppResult<()>;

    // ========== Lines ==========

    /// Insert one line
    async fn add_line(&self, line: &OrderLine) -> AppResult<()>;

    /// Overwrite one line
    async fn update_line(&self, line: &OrderLine) -> AppResult<()>;

    /// Delete one line
    async fn remove_line(&self, line_id: &OrderLineId) -> AppResult<()>;

    // ========== Queries ==========

    /// List orders with their lines, newest first
    async fn list(
        &self,
        filter: OrderFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Order>>;

    /// Number of not yet completed orders of a customer
    async fn count_open_for_customer(&self, customer_id: &CustomerId) -> AppResult<u64>;

    /// Whether any order references the vehicle
    async fn exists_for_vehicle(&self, vehicle_id: &VehicleId) -> AppResult<bool>;

    /// Whether any order line references the part
    async fn exists_line_for_part(&self, part_id: &PartId) -> AppResult<bool>;
}
