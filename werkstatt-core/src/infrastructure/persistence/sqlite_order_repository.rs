//! SQLite order repository
//!
//! Orders are stored as a head row plus one row per line. Reads assemble
//! the aggregate; the line ordering is the insertion order.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Order, OrderFilter, OrderLine};
use crate::domain::enums::OrderStatus;
use crate::domain::repositories::OrderRepository;
use crate::domain::value_objects::{CustomerId, OrderId, OrderLineId, PartId, VehicleId};

use super::converters::{order_from_row, order_line_from_row};
use super::rows::{OrderLineRow, OrderRow};

const HEAD_COLUMNS: &str = "id, customer_id, vehicle_id, title, description, status, priority, \
                            labor_hours, notes, completed_at, created_at, updated_at";

const LINE_COLUMNS: &str = "id, order_id, part_id, description, quantity, unit_price, \
                            discount_percent";

pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lines of the given orders, grouped by order id.
    async fn load_lines(&self, order_ids: &[String]) -> AppResult<HashMap<String, Vec<OrderLine>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; order_ids.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM order_lines WHERE order_id IN ({}) ORDER BY rowid",
            LINE_COLUMNS, placeholders
        );

        let mut query = sqlx::query_as::<_, OrderLineRow>(&sql);
        for id in order_ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load order lines: {}", e)))?;

        let mut grouped: HashMap<String, Vec<OrderLine>> = HashMap::new();
        for row in rows {
            let order_id = row.order_id.clone();
            grouped
                .entry(order_id)
                .or_default()
                .push(order_line_from_row(row)?);
        }

        Ok(grouped)
    }
}

fn bind_line<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    line: &'q OrderLine,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(line.id().0.to_string())
        .bind(line.order_id().0.to_string())
        .bind(line.part_id().0.to_string())
        .bind(line.description())
        .bind(line.quantity())
        .bind(line.unit_price().to_string())
        .bind(line.discount_percent().to_string())
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> AppResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders WHERE id = ?",
            HEAD_COLUMNS
        ))
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load order: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut lines_by_order = self.load_lines(std::slice::from_ref(&row.id)).await?;
        let lines = lines_by_order.remove(&row.id).unwrap_or_default();

        Ok(Some(order_from_row(row, lines)?))
    }

    async fn save(&self, order: &Order) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, vehicle_id, title, description, status, priority,
                labor_hours, notes, completed_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.id().0.to_string())
        .bind(order.customer_id().0.to_string())
        .bind(order.vehicle_id().map(|id| id.0.to_string()))
        .bind(order.title())
        .bind(order.description())
        .bind(order.status().code())
        .bind(order.priority().code())
        .bind(order.labor_hours().to_string())
        .bind(order.notes())
        .bind(order.completed_at())
        .bind(order.audit_info().created_at)
        .bind(order.audit_info().updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save order: {}", e)))?;

        for line in order.lines() {
            let query = sqlx::query(
                r#"
                INSERT INTO order_lines (
                    id, order_id, part_id, description, quantity, unit_price, discount_percent
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            );
            bind_line(query, line)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to save order line: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn update(&self, order: &Order) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                vehicle_id = ?,
                title = ?,
                description = ?,
                status = ?,
                priority = ?,
                labor_hours = ?,
                notes = ?,
                completed_at = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(order.vehicle_id().map(|id| id.0.to_string()))
        .bind(order.title())
        .bind(order.description())
        .bind(order.status().code())
        .bind(order.priority().code())
        .bind(order.labor_hours().to_string())
        .bind(order.notes())
        .bind(order.completed_at())
        .bind(order.audit_info().updated_at)
        .bind(order.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update order: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("order does not exist".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &OrderId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("DELETE FROM order_lines WHERE order_id = ?")
            .bind(id.0.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete order lines: {}", e)))?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete order: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("order does not exist".to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn add_line(&self, line: &OrderLine) -> AppResult<()> {
        let query = sqlx::query(
            r#"
            INSERT INTO order_lines (
                id, order_id, part_id, description, quantity, unit_price, discount_percent
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        );
        bind_line(query, line)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to save order line: {}", e)))?;

        Ok(())
    }

    async fn update_line(&self, line: &OrderLine) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE order_lines SET
                description = ?,
                quantity = ?,
                unit_price = ?,
                discount_percent = ?
            WHERE id = ?
            "#,
        )
        .bind(line.description())
        .bind(line.quantity())
        .bind(line.unit_price().to_string())
        .bind(line.discount_percent().to_string())
        .bind(line.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update order line: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("order line does not exist".to_string()));
        }

        Ok(())
    }

    async fn remove_line(&self, line_id: &OrderLineId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM order_lines WHERE id = ?")
            .bind(line_id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete order line: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("order line does not exist".to_string()));
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: OrderFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Order>> {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            binds.push(status.code().to_string());
        }
        if let Some(customer_id) = &filter.customer_id {
            conditions.push("customer_id = ?");
            binds.push(customer_id.0.to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM orders{}", where_clause);
        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count orders: {}", e)))?;

        let list_sql = format!(
            "SELECT {} FROM orders{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            HEAD_COLUMNS, where_clause
        );
        let mut list_query = sqlx::query_as::<_, OrderRow>(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        let rows = list_query
            .bind(pagination.page_size as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list orders: {}", e)))?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut lines_by_order = self.load_lines(&ids).await?;

        let items: Vec<Order> = rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_order.remove(&row.id).unwrap_or_default();
                order_from_row(row, lines)
            })
            .collect::<AppResult<_>>()?;

        Ok(PagedResult::new(items, total.0 as u64, &pagination))
    }

    async fn count_open_for_customer(&self, customer_id: &CustomerId) -> AppResult<u64> {
        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE customer_id = ? AND status != ?",
        )
        .bind(customer_id.0.to_string())
        .bind(OrderStatus::Completed.code())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count open orders: {}", e)))?;

        Ok(total.0 as u64)
    }

    async fn exists_for_vehicle(&self, vehicle_id: &VehicleId) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM orders WHERE vehicle_id = ?)")
                .bind(vehicle_id.0.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check orders: {}", e)))?;

        Ok(result.0)
    }

    async fn exists_line_for_part(&self, part_id: &PartId) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM order_lines WHERE part_id = ?)")
                .bind(part_id.0.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check order lines: {}", e)))?;

        Ok(result.0)
    }
}
