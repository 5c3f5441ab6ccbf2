//! SQLite expense repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Expense, ExpenseFilter};
use crate::domain::repositories::ExpenseRepository;
use crate::domain::value_objects::ExpenseId;

use super::converters::expense_from_row;
use super::rows::ExpenseRow;

const COLUMNS: &str = "id, category, amount, date, description, receipt_number, \
                       created_at, updated_at";

pub struct SqliteExpenseRepository {
    pool: SqlitePool,
}

impl SqliteExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for SqliteExpenseRepository {
    async fn find_by_id(&self, id: &ExpenseId) -> AppResult<Option<Expense>> {
        let row = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {} FROM expenses WHERE id = ?",
            COLUMNS
        ))
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load expense: {}", e)))?;

        row.map(expense_from_row).transpose()
    }

    async fn save(&self, expense: &Expense) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, category, amount, date, description, receipt_number,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id().0.to_string())
        .bind(expense.category())
        .bind(expense.amount().to_string())
        .bind(expense.date())
        .bind(expense.description())
        .bind(expense.receipt_number())
        .bind(expense.audit_info().created_at)
        .bind(expense.audit_info().updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save expense: {}", e)))?;

        Ok(())
    }

    async fn update(&self, expense: &Expense) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE expenses SET
                category = ?,
                amount = ?,
                date = ?,
                description = ?,
                receipt_number = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.category())
        .bind(expense.amount().to_string())
        .bind(expense.date())
        .bind(expense.description())
        .bind(expense.receipt_number())
        .bind(expense.audit_info().updated_at)
        .bind(expense.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update expense: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("expense does not exist".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &ExpenseId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete expense: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("expense does not exist".to_string()));
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: ExpenseFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Expense>> {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();

        if let Some(from) = filter.from {
            conditions.push("date >= ?");
            binds.push(from);
        }
        if let Some(to) = filter.to {
            conditions.push("date <= ?");
            binds.push(to);
        }

        let mut category_bind = None;
        if let Some(category) = &filter.category {
            conditions.push("category = ?");
            category_bind = Some(category.clone());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM expenses{}", where_clause);
        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        if let Some(category) = &category_bind {
            count_query = count_query.bind(category);
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count expenses: {}", e)))?;

        let list_sql = format!(
            "SELECT {} FROM expenses{} ORDER BY date DESC, created_at DESC LIMIT ? OFFSET ?",
            COLUMNS, where_clause
        );
        let mut list_query = sqlx::query_as::<_, ExpenseRow>(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        if let Some(category) = &category_bind {
            list_query = list_query.bind(category);
        }
        let rows = list_query
            .bind(pagination.page_size as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list expenses: {}", e)))?;

        let items: Vec<Expense> = rows
            .into_iter()
            .map(expense_from_row)
            .collect::<AppResult<_>>()?;

        Ok(PagedResult::new(items, total.0 as u64, &pagination))
    }

    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Expense>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {} FROM expenses WHERE date >= ? AND date <= ? ORDER BY date",
            COLUMNS
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list expenses: {}", e)))?;

        rows.into_iter().map(expense_from_row).collect()
    }
}
