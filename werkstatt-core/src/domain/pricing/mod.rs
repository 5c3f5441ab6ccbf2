//! Pricing computation
//!
//! Pure and injectable: the handlers read the rates from the settings
//! store, wrap them in [`PricingSettings`] and pass them in. Nothing in
//! here touches storage.

mod line;
mod settings;
mod totals;

pub use line::LineItem;
pub use settings::PricingSettings;
pub use totals::{OrderTotals, TotalsBreakdown};
