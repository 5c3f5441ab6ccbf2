//! Commands module

pub mod customer_commands;
pub mod expense_commands;
pub mod invoice_commands;
pub mod order_commands;
pub mod part_commands;
pub mod setting_commands;
pub mod vehicle_commands;

pub use customer_commands::*;
pub use expense_commands::*;
pub use invoice_commands::*;
pub use order_commands::*;
pub use part_commands::*;
pub use setting_commands::*;
pub use vehicle_commands::*;
