//! File export renderers

mod csv;

pub use csv::{inventory_csv, profit_loss_csv};
