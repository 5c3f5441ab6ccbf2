//! Line-item pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use werkstatt_domain_core::Money;
use werkstatt_errors::{AppError, AppResult};

/// One payable line: a part usage or the labor line.
///
/// Validation happens here and nowhere else. A quantity of zero or less is
/// rejected rather than coerced, and a discount outside [0, 100] is
/// rejected rather than clamped, so operator mistakes surface at entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    description: String,
    quantity: i64,
    unit_price: Money,
    discount_percent: Decimal,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        discount_percent: Decimal,
    ) -> AppResult<Self> {
        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }

        if unit_price.is_negative() {
            return Err(AppError::validation(format!(
                "unit price cannot be negative, got {}",
                unit_price
            )));
        }

        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "discount must be between 0 and 100, got {}",
                discount_percent
            )));
        }

        Ok(Self {
            description: description.into(),
            quantity,
            unit_price,
            discount_percent,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// `quantity * unit_price * (1 - discount/100)`, exact.
    pub fn line_total(&self) -> Money {
        let factor = Decimal::ONE - self.discount_percent / Decimal::ONE_HUNDRED;
        (self.unit_price * self.quantity) * factor
    }

    /// The line total rounded half-up to two decimal places, for display
    /// and for invoice snapshots.
    pub fn rounded_total(&self) -> Money {
        self.line_total().rounded()
    }
}
