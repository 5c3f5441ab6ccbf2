//! Expense repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::AppResult;

use crate::domain::entities::{Expense, ExpenseFilter};
use crate::domain::value_objects::ExpenseId;

/// Expense repository interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Find an expense by id
    async fn find_by_id(&self, id: &ExpenseId) -> AppResult<Option<Expense>>;

    /// Save a new expense
    async fn save(&self, expense: &Expense) -> AppResult<()>;

    /// Update an existing expense
    async fn update(&self, expense: &Expense) -> AppResult<()>;

    /// Delete an expense
    async fn delete(&self, id: &ExpenseId) -> AppResult<()>;

    /// List expenses, newest first
    async fn list(
        &self,
        filter: ExpenseFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Expense>>;

    /// All expenses dated in the inclusive range
    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Expense>>;
}
