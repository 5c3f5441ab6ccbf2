//! SQLite part repository

use async_trait::async_trait;
use sqlx::SqlitePool;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Part, PartFilter, StockMovement};
use crate::domain::repositories::PartRepository;
use crate::domain::value_objects::{PartId, Sku};

use super::converters::{part_from_row, stock_movement_from_row};
use super::rows::{PartRow, StockMovementRow};

const COLUMNS: &str = "id, sku, description, category, stock_quantity, min_stock, \
                       purchase_price, sale_price, supplier, storage_location, unit, \
                       created_at, updated_at";

pub struct SqlitePartRepository {
    pool: SqlitePool,
}

impl SqlitePartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// WHERE clause and bind values for a part filter. The below-minimum
/// condition needs no bind; a threshold of zero never matches.
fn filter_clause(filter: &PartFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    if let Some(term) = &filter.search_term {
        conditions.push("(sku LIKE ? OR description LIKE ?)".to_string());
        let pattern = format!("%{}%", term);
        binds.push(pattern.clone());
        binds.push(pattern);
    }
    if let Some(category) = &filter.category {
        conditions.push("category = ?".to_string());
        binds.push(category.clone());
    }
    if filter.below_minimum {
        conditions.push("min_stock > 0 AND stock_quantity <= min_stock".to_string());
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), binds)
    }
}

#[async_trait]
impl PartRepository for SqlitePartRepository {
    async fn find_by_id(&self, id: &PartId) -> AppResult<Option<Part>> {
        let row = sqlx::query_as::<_, PartRow>(&format!(
            "SELECT {} FROM parts WHERE id = ?",
            COLUMNS
        ))
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load part: {}", e)))?;

        row.map(part_from_row).transpose()
    }

    async fn find_by_sku(&self, sku: &Sku) -> AppResult<Option<Part>> {
        let row = sqlx::query_as::<_, PartRow>(&format!(
            "SELECT {} FROM parts WHERE sku = ?",
            COLUMNS
        ))
        .bind(sku.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load part: {}", e)))?;

        row.map(part_from_row).transpose()
    }

    async fn exists_by_sku(&self, sku: &Sku) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM parts WHERE sku = ?)")
                .bind(sku.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check part number: {}", e)))?;

        Ok(result.0)
    }

    async fn save(&self, part: &Part) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO parts (
                id, sku, description, category, stock_quantity, min_stock,
                purchase_price, sale_price, supplier, storage_location, unit,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(part.id().0.to_string())
        .bind(part.sku().as_str())
        .bind(part.description())
        .bind(part.category())
        .bind(part.stock_quantity())
        .bind(part.min_stock())
        .bind(part.purchase_price().to_string())
        .bind(part.sale_price().to_string())
        .bind(part.supplier())
        .bind(part.storage_location())
        .bind(part.unit())
        .bind(part.audit_info().created_at)
        .bind(part.audit_info().updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save part: {}", e)))?;

        Ok(())
    }

    async fn update(&self, part: &Part) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE parts SET
                sku = ?,
                description = ?,
                category = ?,
                stock_quantity = ?,
                min_stock = ?,
                purchase_price = ?,
                sale_price = ?,
                supplier = ?,
                storage_location = ?,
                unit = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(part.sku().as_str())
        .bind(part.description())
        .bind(part.category())
        .bind(part.stock_quantity())
        .bind(part.min_stock())
        .bind(part.purchase_price().to_string())
        .bind(part.sale_price().to_string())
        .bind(part.supplier())
        .bind(part.storage_location())
        .bind(part.unit())
        .bind(part.audit_info().updated_at)
        .bind(part.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update part: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("part does not exist".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &PartId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM parts WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete part: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("part does not exist".to_string()));
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: PartFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Part>> {
        let (where_clause, binds) = filter_clause(&filter);

        let count_sql = format!("SELECT COUNT(*) FROM parts{}", where_clause);
        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count parts: {}", e)))?;

        let list_sql = format!(
            "SELECT {} FROM parts{} ORDER BY sku LIMIT ? OFFSET ?",
            COLUMNS, where_clause
        );
        let mut list_query = sqlx::query_as::<_, PartRow>(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        let rows = list_query
            .bind(pagination.page_size as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list parts: {}", e)))?;

        let items: Vec<Part> = rows
            .into_iter()
            .map(part_from_row)
            .collect::<AppResult<_>>()?;

        Ok(PagedResult::new(items, total.0 as u64, &pagination))
    }

    async fn list_all(&self) -> AppResult<Vec<Part>> {
        let rows = sqlx::query_as::<_, PartRow>(&format!(
            "SELECT {} FROM parts ORDER BY sku",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list parts: {}", e)))?;

        rows.into_iter().map(part_from_row).collect()
    }

    async fn save_movement(&self, movement: &StockMovement) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stock_movements (id, part_id, change, stock_after, note, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(movement.id().0.to_string())
        .bind(movement.part_id().0.to_string())
        .bind(movement.change())
        .bind(movement.stock_after())
        .bind(movement.note())
        .bind(movement.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save stock movement: {}", e)))?;

        Ok(())
    }

    async fn list_movements(
        &self,
        part_id: &PartId,
        pagination: Pagination,
    ) -> AppResult<PagedResult<StockMovement>> {
        let total: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM stock_movements WHERE part_id = ?")
                .bind(part_id.0.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count stock movements: {}", e)))?;

        let rows = sqlx::query_as::<_, StockMovementRow>(
            r#"
            SELECT id, part_id, change, stock_after, note, created_at
            FROM stock_movements
            WHERE part_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(part_id.0.to_string())
        .bind(pagination.page_size as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list stock movements: {}", e)))?;

        let items: Vec<StockMovement> = rows
            .into_iter()
            .map(stock_movement_from_row)
            .collect::<AppResult<_>>()?;

        Ok(PagedResult::new(items, total.0 as u64, &pagination))
    }
}
