//! Expense commands

use chrono::{DateTime, Utc};
use werkstatt_domain_core::Money;
use werkstatt_errors::AppResult;

use crate::domain::value_objects::ExpenseId;

/// Create expense command
#[derive(Debug, Clone)]
pub struct CreateExpenseCommand {
    pub category: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub description: String,
    pub receipt_number: String,
}

impl CreateExpenseCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_expense_fields(&self.category, self.amount)
    }
}

/// Update expense command
#[derive(Debug, Clone)]
pub struct UpdateExpenseCommand {
    pub expense_id: ExpenseId,
    pub category: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub description: String,
    pub receipt_number: String,
}

impl UpdateExpenseCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_expense_fields(&self.category, self.amount)
    }
}

/// Delete expense command
#[derive(Debug, Clone)]
pub struct DeleteExpenseCommand {
    pub expense_id: ExpenseId,
}

fn validate_expense_fields(category: &str, amount: Money) -> AppResult<()> {
    if category.trim().is_empty() {
        return Err(werkstatt_errors::AppError::validation(
            "expense category cannot be empty",
        ));
    }
    if amount.is_negative() || amount.is_zero() {
        return Err(werkstatt_errors::AppError::validation(format!(
            "expense amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}
