//! Queries module

pub mod customer_queries;
pub mod expense_queries;
pub mod invoice_queries;
pub mod order_queries;
pub mod part_queries;
pub mod report_queries;
pub mod vehicle_queries;

pub use customer_queries::*;
pub use expense_queries::*;
pub use invoice_queries::*;
pub use order_queries::*;
pub use part_queries::*;
pub use report_queries::*;
pub use vehicle_queries::*;
