//! Reporting handler

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;
use werkstatt_domain_core::Money;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::Part;
use crate::domain::repositories::{ExpenseRepository, InvoiceRepository, PartRepository};

use crate::application::queries::*;

pub struct ReportHandler {
    invoice_repo: Arc<dyn InvoiceRepository>,
    expense_repo: Arc<dyn ExpenseRepository>,
    part_repo: Arc<dyn PartRepository>,
}

impl ReportHandler {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        expense_repo: Arc<dyn ExpenseRepository>,
        part_repo: Arc<dyn PartRepository>,
    ) -> Self {
        Self {
            invoice_repo,
            expense_repo,
            part_repo,
        }
    }

    /// Revenue against expenses over an inclusive date range.
    ///
    /// Sums are carried exactly and rounded once at the edge of the
    /// report. Revenue counts invoices by issue date; unpaid ones show up
    /// in the outstanding split.
    pub async fn profit_loss(&self, query: ProfitLossQuery) -> AppResult<ProfitLossReport> {
        if query.from > query.to {
            return Err(AppError::validation(format!(
                "date range is inverted: {} is after {}",
                query.from, query.to
            )));
        }

        let invoices = self.invoice_repo.list_between(query.from, query.to).await?;
        let expenses = self.expense_repo.list_between(query.from, query.to).await?;

        let mut invoiced_total = Money::ZERO;
        let mut paid_total = Money::ZERO;
        for summary in &invoices {
            invoiced_total = invoiced_total + summary.grand_total;
            if summary.paid {
                paid_total = paid_total + summary.grand_total;
            }
        }
        let outstanding_total = invoiced_total - paid_total;

        // BTreeMap keeps the category breakdown in a stable order.
        let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut expense_total = Money::ZERO;
        for expense in &expenses {
            expense_total = expense_total + expense.amount();
            let entry = by_category
                .entry(expense.category().to_string())
                .or_insert(Money::ZERO);
            *entry = *entry + expense.amount();
        }

        let expenses_by_category = by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total: total.rounded(),
            })
            .collect();

        info!(
            "Profit/loss report: {} invoice(s), {} expense(s)",
            invoices.len(),
            expenses.len()
        );

        Ok(ProfitLossReport {
            from: query.from,
            to: query.to,
            invoiced_total: invoiced_total.rounded(),
            paid_total: paid_total.rounded(),
            outstanding_total: outstanding_total.rounded(),
            invoice_count: invoices.len() as u64,
            expense_total: expense_total.rounded(),
            expenses_by_category,
            net_result: (invoiced_total - expense_total).rounded(),
        })
    }

    /// The complete parts list, feed for the inventory export.
    pub async fn inventory(&self) -> AppResult<Vec<Part>> {
        self.part_repo.list_all().await
    }
}
