//! Persistence implementations

mod converters;
mod rows;

pub mod database;
pub mod migrations;

mod sqlite_customer_repository;
mod sqlite_expense_repository;
mod sqlite_invoice_repository;
mod sqlite_order_repository;
mod sqlite_part_repository;
mod sqlite_setting_repository;
mod sqlite_vehicle_repository;

pub use migrations::MigrationManager;
pub use sqlite_customer_repository::SqliteCustomerRepository;
pub use sqlite_expense_repository::SqliteExpenseRepository;
pub use sqlite_invoice_repository::SqliteInvoiceRepository;
pub use sqlite_order_repository::SqliteOrderRepository;
pub use sqlite_part_repository::SqlitePartRepository;
pub use sqlite_setting_repository::SqliteSettingRepository;
pub use sqlite_vehicle_repository::SqliteVehicleRepository;
