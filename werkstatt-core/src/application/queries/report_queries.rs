//! Reporting queries

use chrono::{DateTime, Utc};
use serde::Serialize;
use werkstatt_domain_core::Money;

/// Profit and loss query over an inclusive date range
#[derive(Debug, Clone)]
pub struct ProfitLossQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Revenue and expenses of a period.
///
/// Revenue counts invoices by issue date, regardless of payment state;
/// the paid split is informational. `net_result` is invoiced revenue
/// minus expenses.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitLossReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub invoiced_total: Money,
    pub paid_total: Money,
    pub outstanding_total: Money,
    pub invoice_count: u64,
    pub expense_total: Money,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub net_result: Money,
}

/// Expense sum of one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}
