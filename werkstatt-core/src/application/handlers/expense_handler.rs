//! Expense handler

use std::sync::Arc;

use tracing::info;
use werkstatt_common::PagedResult;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::Expense;
use crate::domain::repositories::ExpenseRepository;
use crate::domain::value_objects::ExpenseId;

use crate::application::commands::*;
use crate::application::queries::*;

pub struct ExpenseHandler {
    expense_repo: Arc<dyn ExpenseRepository>,
}

impl ExpenseHandler {
    pub fn new(expense_repo: Arc<dyn ExpenseRepository>) -> Self {
        Self { expense_repo }
    }

    /// Record an expense
    pub async fn create(&self, cmd: CreateExpenseCommand) -> AppResult<ExpenseId> {
        cmd.validate()?;

        let expense = Expense::new(cmd.category, cmd.amount, cmd.date, cmd.description)
            .with_receipt_number(cmd.receipt_number);

        self.expense_repo.save(&expense).await?;

        info!("Expense recorded: {} ({})", expense.id().0, expense.amount());
        Ok(expense.id().clone())
    }

    /// Update an expense
    pub async fn update(&self, cmd: UpdateExpenseCommand) -> AppResult<()> {
        cmd.validate()?;

        let mut expense = self
            .expense_repo
            .find_by_id(&cmd.expense_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("expense {} does not exist", cmd.expense_id))
            })?;

        expense.update(
            cmd.category,
            cmd.amount,
            cmd.date,
            cmd.description,
            cmd.receipt_number,
        );

        self.expense_repo.update(&expense).await?;

        info!("Expense updated: {}", cmd.expense_id.0);
        Ok(())
    }

    /// Delete an expense
    pub async fn delete(&self, cmd: DeleteExpenseCommand) -> AppResult<()> {
        if self
            .expense_repo
            .find_by_id(&cmd.expense_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(format!(
                "expense {} does not exist",
                cmd.expense_id
            )));
        }

        self.expense_repo.delete(&cmd.expense_id).await?;

        info!("Expense deleted: {}", cmd.expense_id.0);
        Ok(())
    }

    /// Get an expense
    pub async fn get(&self, query: GetExpenseQuery) -> AppResult<Expense> {
        self.expense_repo
            .find_by_id(&query.expense_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("expense {} does not exist", query.expense_id))
            })
    }

    /// List expenses
    pub async fn list(&self, query: ListExpensesQuery) -> AppResult<PagedResult<Expense>> {
        self.expense_repo.list(query.filter, query.pagination).await
    }
}
