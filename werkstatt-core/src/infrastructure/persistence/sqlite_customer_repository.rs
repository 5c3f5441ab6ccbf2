//! SQLite customer repository

use async_trait::async_trait;
use sqlx::SqlitePool;
use werkstatt_common::{PagedResult, Pagination};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Customer, CustomerFilter};
use crate::domain::repositories::CustomerRepository;
use crate::domain::value_objects::CustomerId;

use super::converters::customer_from_row;
use super::rows::CustomerRow;

const COLUMNS: &str = "id, first_name, last_name, company, phone, email, \
                       street, postal_code, city, notes, created_at, updated_at";

pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {} FROM customers WHERE id = ?",
            COLUMNS
        ))
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load customer: {}", e)))?;

        row.map(customer_from_row).transpose()
    }

    async fn save(&self, customer: &Customer) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, first_name, last_name, company, phone, email,
                street, postal_code, city, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer.id().0.to_string())
        .bind(customer.first_name())
        .bind(customer.last_name())
        .bind(customer.company())
        .bind(customer.phone())
        .bind(customer.email())
        .bind(customer.street())
        .bind(customer.postal_code())
        .bind(customer.city())
        .bind(customer.notes())
        .bind(customer.audit_info().created_at)
        .bind(customer.audit_info().updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save customer: {}", e)))?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                first_name = ?,
                last_name = ?,
                company = ?,
                phone = ?,
                email = ?,
                street = ?,
                postal_code = ?,
                city = ?,
                notes = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(customer.first_name())
        .bind(customer.last_name())
        .bind(customer.company())
        .bind(customer.phone())
        .bind(customer.email())
        .bind(customer.street())
        .bind(customer.postal_code())
        .bind(customer.city())
        .bind(customer.notes())
        .bind(customer.audit_info().updated_at)
        .bind(customer.id().0.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update customer: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("customer does not exist".to_string()));
        }

        Ok(())
    }

    async fn delete_with_vehicles(&self, id: &CustomerId) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("DELETE FROM vehicles WHERE customer_id = ?")
            .bind(id.0.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete vehicles: {}", e)))?;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete customer: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("customer does not exist".to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn list(
        &self,
        filter: CustomerFilter,
        pagination: Pagination,
    ) -> AppResult<PagedResult<Customer>> {
        let (total, rows) = if let Some(term) = &filter.search_term {
            let pattern = format!("%{}%", term);

            let total: (i64,) = sqlx::query_as(
                r#"
                SELECT COUNT(*) FROM customers
                WHERE first_name LIKE ?1 OR last_name LIKE ?1 OR company LIKE ?1 OR city LIKE ?1
                "#,
            )
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count customers: {}", e)))?;

            let rows = sqlx::query_as::<_, CustomerRow>(&format!(
                r#"
                SELECT {} FROM customers
                WHERE first_name LIKE ?1 OR last_name LIKE ?1 OR company LIKE ?1 OR city LIKE ?1
                ORDER BY created_at DESC
                LIMIT ?2 OFFSET ?3
                "#,
                COLUMNS
            ))
            .bind(&pattern)
            .bind(pagination.page_size as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list customers: {}", e)))?;

            (total, rows)
        } else {
            let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count customers: {}", e)))?;

            let rows = sqlx::query_as::<_, CustomerRow>(&format!(
                "SELECT {} FROM customers ORDER BY created_at DESC LIMIT ? OFFSET ?",
                COLUMNS
            ))
            .bind(pagination.page_size as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list customers: {}", e)))?;

            (total, rows)
        };

        let items: Vec<Customer> = rows
            .into_iter()
            .map(customer_from_row)
            .collect::<AppResult<_>>()?;

        Ok(PagedResult::new(items, total.0 as u64, &pagination))
    }
}
