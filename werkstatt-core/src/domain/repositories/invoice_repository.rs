//! Invoice repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::AppResult;

use crate::domain::entities::{Invoice, InvoiceFilter, InvoiceSummary};
use crate::domain::value_objects::{InvoiceId, OrderId};

/// Invoice repository interface.
///
/// Invoices load and list together with their snapshot lines. Lines are
/// frozen at creation, so there are no line-level write methods; `update`
/// only touches the head.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    // ========== CRUD ==========

    /// Find an invoice with its lines
    async fn find_by_id(&self, id: &InvoiceId) -> AppResult<Option<Invoice>>;

    /// Whether an invoice exists for the order
    async fn exists_for_order(&self, order_id: &OrderId) -> AppResult<bool>;

    /// Total number of invoices ever stored. Basis of the number counter.
    async fn count_all(&self) -> AppResult<u64>;

    /// Save a new invoice together with its lines in one transaction
    async fn save(&self, invoice: &Invoice) -> AppResult<()>;

    /// Update the invoice head
    async fn update(&self, invoice: &Invoice) -> AppResult<()>;

    /// Delete an invoice and its lines in one transaction
    async fn delete(&self, id: &InvoiceId) -> AppResult<()>;

    // ========== Queries ==========

    /// List invoices with their lines, newest first
    async fn list(
        &self,
        filter: InvoiceFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Invoice>>;

    /// Revenue projections for all invoices issued in the inclusive range
    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<InvoiceSummary>>;
}
