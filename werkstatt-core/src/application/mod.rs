//! Application layer

pub mod commands;
pub mod handlers;
pub mod queries;

pub use handlers::{
    CustomerHandler, ExpenseHandler, InvoiceHandler, OrderHandler, PartHandler, ReportHandler,
    SettingsHandler, VehicleHandler,
};
