//! Order total aggregation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use werkstatt_domain_core::Money;
use werkstatt_errors::{AppError, AppResult};

use super::{LineItem, PricingSettings};

/// The computed totals of an order, exact.
///
/// This is the single place subtotal, discount, tax and grand total are
/// derived. The order screen, the invoice materializer and the exporters
/// all go through [`OrderTotals::compute`] and [`OrderTotals::rounded`];
/// none of them repeats the arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    labor_cost: Money,
    subtotal: Money,
    discount_percent: Decimal,
    discount_amount: Money,
    net: Money,
    tax_rate_percent: Decimal,
    tax_amount: Money,
    grand_total: Money,
}

impl OrderTotals {
    /// Aggregate line totals and labor into the order's money figures.
    ///
    /// `labor_cost = labor_hours * hourly_rate` (labor carries no
    /// discount), `subtotal = sum of line totals + labor_cost`, the
    /// order-level discount comes off the subtotal, tax applies to the
    /// discounted net. Every intermediate stays an exact decimal.
    pub fn compute(
        lines: &[LineItem],
        labor_hours: Decimal,
        order_discount_percent: Decimal,
        settings: &PricingSettings,
    ) -> AppResult<Self> {
        if labor_hours.is_sign_negative() {
            return Err(AppError::validation(format!(
                "labor hours cannot be negative, got {}",
                labor_hours
            )));
        }

        if order_discount_percent < Decimal::ZERO || order_discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(AppError::validation(format!(
                "order discount must be between 0 and 100, got {}",
                order_discount_percent
            )));
        }

        let labor_cost = settings.hourly_rate() * labor_hours;
        let subtotal = lines.iter().map(LineItem::line_total).sum::<Money>() + labor_cost;
        let discount_amount = subtotal.percentage(order_discount_percent);
        let net = subtotal - discount_amount;
        let tax_amount = net.percentage(settings.tax_rate_percent());
        let grand_total = net + tax_amount;

        Ok(Self {
            labor_cost,
            subtotal,
            discount_percent: order_discount_percent,
            discount_amount,
            net,
            tax_rate_percent: settings.tax_rate_percent(),
            tax_amount,
            grand_total,
        })
    }

    pub fn labor_cost(&self) -> Money {
        self.labor_cost
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn discount_amount(&self) -> Money {
        self.discount_amount
    }

    pub fn net(&self) -> Money {
        self.net
    }

    pub fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }

    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    pub fn grand_total(&self) -> Money {
        self.grand_total
    }

    /// The two-decimal half-up view used for display, persistence and
    /// export. Each figure is rounded independently.
    pub fn rounded(&self) -> TotalsBreakdown {
        TotalsBreakdown {
            labor_cost: self.labor_cost.rounded(),
            subtotal: self.subtotal.rounded(),
            discount_percent: self.discount_percent,
            discount_amount: self.discount_amount.rounded(),
            net: self.net.rounded(),
            tax_rate_percent: self.tax_rate_percent,
            tax_amount: self.tax_amount.rounded(),
            grand_total: self.grand_total.rounded(),
        }
    }
}

/// Rounded totals, ready to print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    pub labor_cost: Money,
    pub subtotal: Money,
    pub discount_percent: Decimal,
    pub discount_amount: Money,
    pub net: Money,
    pub tax_rate_percent: Decimal,
    pub tax_amount: Money,
    pub grand_total: Money,
}
