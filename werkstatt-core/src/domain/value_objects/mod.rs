//! Value objects

mod ids;
mod invoice_number;
mod sku;

pub use ids::{
    CustomerId, ExpenseId, InvoiceId, InvoiceLineId, OrderId, OrderLineId, PartId,
    StockMovementId, VehicleId,
};
pub use invoice_number::{InvoiceNumber, InvoiceNumberError};
pub use sku::{Sku, SkuError};
