//! Werkstatt core library
//!
//! Storage and business layer for a small repair shop: customers, vehicles,
//! work orders, spare parts, invoices, expenses and the settings store, all
//! persisted in one SQLite file. The handlers in [`application`] are the
//! surface the desktop UI calls into.

pub mod application;
pub mod domain;
pub mod infrastructure;
