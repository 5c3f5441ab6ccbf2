//! SQLite invoice repository
//!
//! Invoices and their lines are immutable after creation except for the
//! paid flags and notes, so `update` touches the head row only.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Invoice, InvoiceFilter, InvoiceLine, InvoiceSummary};
use crate::domain::repositories::InvoiceRepository;
use crate::domain::value_objects::{InvoiceId, OrderId};

use super::converters::{invoice_from_row, invoice_line_from_row, invoice_summary_from_row};
use super::rows::{InvoiceLineRow, InvoiceRow, InvoiceSummaryRow};

const HEAD_COLUMNS: &str = "id, order_id, number, issue_date, subtotal, discount_percent, \
                            discount_amount, net, tax_rate_percent, tax_amount, grand_total, \
                            paid, paid_at, payment_method, notes, created_at, updated_at";

const LINE_COLUMNS: &str = "id, invoice_id, part_id, sku, description, quantity, unit_price, \
                            discount_percent, line_total, position";

pub struct SqliteInvoiceRepository {
    pool: SqlitePool,
}

impl SqliteInvoiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_lines(
        &self,
        invoice_ids: &[String],
    ) -> AppResult<HashMap<String, Vec<InvoiceLine>>> {
        if invoice_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; invoice_ids.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM invoice_lines WHERE invoice_id IN ({}) ORDER BY position",
            LINE_COLUMNS, placeholders
        );

        let mut query = sqlx::query_as::<_, InvoiceLineRow>(&sql);
        for id in invoice_ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load invoice lines: {}", e)))?;

        let mut grouped: HashMap<String, Vec<InvoiceLine>> = HashMap::new();
        for row in rows {
            let invoice_id = row.invoice_id.clone();
            grouped
                .entry(invoice_id)
                .or_default()
                .push(invoice_line_from_row(row)?);
        }

        Ok(grouped)
    }
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
    async fn find_by_id(&self, id: &InvoiceId) -> AppResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {} FROM invoices WHERE id = ?",
            HEAD_COLUMNS
        ))
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load invoice: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut lines_by_invoice = self.load_lines(std::slice::from_ref(&row.id)).await?;
        let lines = lines_by_invoice.remove(&row.id).unwrap_or_default();

        Ok(Some(invoice_from_row(row, lines)?))
    }

    async fn exists_for_order(&self, order_id: &OrderId) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM invoices WHERE order_id = ?)")
                .bind(order_id.0.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check invoices: {}", e)))?;

        Ok(result.0)
    }

    async fn count_all(&self) -> AppResult<u64> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count invoices: {}", e)))?;

        Ok(total.0 as u64)
    }

    async fn save(&self, invoice: &Invoice) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, order_id, number, issue_date, subtotal, discount_percent,
                discount_amount, net, tax_rate_percent, tax_amount, grand_total,
                paid, paid_at, payment_method, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(invoice.id().0.to_string())
        .bind(invoice.order_id().0.to_string())
        .bind(invoice.number().as_str())
        .bind(invoice.issue_date())
        .bind(invoice.subtotal().to_string())
        .bind(invoice.discount_percent().to_string())
        .bind(invoice.discount_amount().to_string())
        .bind(invoice.net().to_string())
        .bind(invoice.tax_rate_percent().to_string())
        .bind(invoice.tax_amount().to_string())
        .bind(invoice.grand_total().to_string())
        .bind(invoice.is_paid())
        .bind(invoice.paid_at())
        .bind(invoice.payment_method().map(|m| m.code()))
        .bind(invoice.notes())
        .bind(invoice.audit_info().created_at)
        .bind(invoice.audit_info().updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save invoice: {}", e)))?;

        for line in invoice.lines() {
            sqlx::query(
                r#"
                INSERT INTO invoice_lines (
                    id, invoice_id, part_id, sku, description, quantity, unit_price,
                    discount_percent, line_total, position
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(line.id().0.to_string())
            .bind(line.invoice_id().0.to_string())
            .bind(line.part_id().map(|id| id.0.to_string()))
            .bind(line.sku().map(|sku| sku.as_str()))
            .bind(line.description())
            .bind(line.quantity())
            .bind(line.unit_price().to_string())
            .bind(line.discount_percent().to_string())
            .bind(line.line_total().to_string())
            .bind(line.position())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save invoice line: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                paid = ?,
                paid_at = ?,
                payment_method = ?,
                notes = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(invoice.is_paid())
        .bind(invoice.paid_at())
        .bind(invoice.payment_method().map(|m| m.code()))
        .bind(invoice.notes())
        .bind(invoice.audit_info().updated_at)
        .bind(invoice.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update invoice: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("invoice does not exist".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &InvoiceId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("DELETE FROM invoice_lines WHERE invoice_id = ?")
            .bind(id.0.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete invoice lines: {}", e)))?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete invoice: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("invoice does not exist".to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn list(
        &self,
        filter: InvoiceFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Invoice>> {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();

        if filter.unpaid_only {
            conditions.push("paid = 0");
        }
        if let Some(year) = filter.year {
            // issue_date is stored ISO-like, the year is its first four chars
            conditions.push("substr(issue_date, 1, 4) = ?");
            binds.push(format!("{:04}", year));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM invoices{}", where_clause);
        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count invoices: {}", e)))?;

        let list_sql = format!(
            "SELECT {} FROM invoices{} ORDER BY issue_date DESC LIMIT ? OFFSET ?",
            HEAD_COLUMNS, where_clause
        );
        let mut list_query = sqlx::query_as::<_, InvoiceRow>(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        let rows = list_query
            .bind(pagination.page_size as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list invoices: {}", e)))?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut lines_by_invoice = self.load_lines(&ids).await?;

        let items: Vec<Invoice> = rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_invoice.remove(&row.id).unwrap_or_default();
                invoice_from_row(row, lines)
            })
            .collect::<AppResult<_>>()?;

        Ok(PagedResult::new(items, total.0 as u64, &pagination))
    }

    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<InvoiceSummary>> {
        let rows = sqlx::query_as::<_, InvoiceSummaryRow>(
            r#"
            SELECT issue_date, grand_total, paid
            FROM invoices
            WHERE issue_date >= ? AND issue_date <= ?
            ORDER BY issue_date
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list invoices: {}", e)))?;

        rows.into_iter().map(invoice_summary_from_row).collect()
    }
}
