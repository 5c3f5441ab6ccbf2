//! Domain entities

mod customer;
mod expense;
mod invoice;
mod order;
mod part;
mod setting;
mod stock_movement;
mod vehicle;

pub use customer::{Customer, CustomerFilter};
pub use expense::{Expense, ExpenseFilter};
pub use invoice::{Invoice, InvoiceFilter, InvoiceLine, InvoiceSummary};
pub use order::{Order, OrderFilter, OrderLine};
pub use part::{Part, PartFilter};
pub use setting::keys as setting_keys;
pub use setting::{BankDetails, CompanyProfile, Setting};
pub use stock_movement::StockMovement;
pub use vehicle::Vehicle;
