//! Repository interfaces

mod customer_repository;
mod expense_repository;
mod invoice_repository;
mod order_repository;
mod part_repository;
mod setting_repository;
mod vehicle_repository;

pub use customer_repository::CustomerRepository;
pub use expense_repository::ExpenseRepository;
pub use invoice_repository::InvoiceRepository;
pub use order_repository::OrderRepository;
pub use part_repository::PartRepository;
pub use setting_repository::SettingRepository;
pub use vehicle_repository::VehicleRepository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use expense_repository::MockExpenseRepository;
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use part_repository::MockPartRepository;
#[cfg(test)]
pub use setting_repository::MockSettingRepository;
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
