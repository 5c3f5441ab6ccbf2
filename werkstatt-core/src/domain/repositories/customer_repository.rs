//! Customer repository interface

use async_trait::async_trait;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::AppResult;

use crate::domain::entities::{Customer, CustomerFilter};
use crate::domain::value_objects::CustomerId;

/// Customer repository interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by id
    async fn find_by_id(&self, id: &CustomerId) -> AppResult<Option<Customer>>;

    /// Save a new customer
    async fn save(&self, customer: &Customer) -> AppResult<()>;

    /// Update an existing customer
    async fn update(&self, customer: &Customer) -> AppResult<()>;

    /// Delete a customer and all of their vehicles in one transaction
    async fn delete_with_vehicles(&self, id: &CustomerId) -> AppResult<()>;

    /// List customers, newest first
    async fn list(
        &self,
        filter: CustomerFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Customer>>;
}
