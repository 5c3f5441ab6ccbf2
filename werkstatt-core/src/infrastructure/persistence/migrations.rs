//! Schema migrations
//!
//! The schema version lives in SQLite's `user_version` header field. Each
//! step runs in one transaction together with the version bump, so a failed
//! step leaves the file at the previous version.

use sqlx::SqlitePool;
use tracing::info;
use werkstatt_errors::{AppError, AppResult};

/// One schema step.
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub sql: &'static str,
}

/// All schema steps, oldest first. New steps are appended; applied steps
/// are never edited.
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "base_tables",
            sql: r#"
            CREATE TABLE customers (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                company TEXT,
                phone TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                street TEXT NOT NULL DEFAULT '',
                postal_code TEXT NOT NULL DEFAULT '',
                city TEXT NOT NULL DEFAULT '',
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE vehicles (
                id TEXT PRIMARY KEY,
                customer_id TEXT NOT NULL,
                make TEXT NOT NULL,
                model TEXT NOT NULL,
                license_plate TEXT NOT NULL,
                vin TEXT,
                year INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX idx_vehicles_customer ON vehicles(customer_id);

            CREATE TABLE parts (
                id TEXT PRIMARY KEY,
                sku TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                stock_quantity INTEGER NOT NULL DEFAULT 0,
                min_stock INTEGER NOT NULL DEFAULT 0,
                purchase_price TEXT NOT NULL DEFAULT '0',
                sale_price TEXT NOT NULL DEFAULT '0',
                supplier TEXT NOT NULL DEFAULT '',
                unit TEXT NOT NULL DEFAULT 'piece',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE orders (
                id TEXT PRIMARY KEY,
                customer_id TEXT NOT NULL,
                vehicle_id TEXT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                status INTEGER NOT NULL DEFAULT 1,
                labor_hours TEXT NOT NULL DEFAULT '0',
                notes TEXT NOT NULL DEFAULT '',
                completed_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX idx_orders_customer ON orders(customer_id);
            CREATE INDEX idx_orders_status ON orders(status);

            CREATE TABLE order_lines (
                id TEXT PRIMARY KEY,
                order_id TEXT NOT NULL,
                part_id TEXT NOT NULL,
                description TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price TEXT NOT NULL,
                discount_percent TEXT NOT NULL DEFAULT '0'
            );

            CREATE INDEX idx_order_lines_order ON order_lines(order_id);

            CREATE TABLE settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                updated_at TEXT NOT NULL
            );
            "#,
        },
        Migration {
            version: 2,
            name: "invoices",
            sql: r#"
            CREATE TABLE invoices (
                id TEXT PRIMARY KEY,
                order_id TEXT NOT NULL UNIQUE,
                number TEXT NOT NULL UNIQUE,
                issue_date TEXT NOT NULL,
                subtotal TEXT NOT NULL,
                discount_percent TEXT NOT NULL DEFAULT '0',
                discount_amount TEXT NOT NULL DEFAULT '0',
                net TEXT NOT NULL,
                tax_rate_percent TEXT NOT NULL,
                tax_amount TEXT NOT NULL,
                grand_total TEXT NOT NULL,
                paid INTEGER NOT NULL DEFAULT 0,
                paid_at TEXT,
                payment_method TEXT,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX idx_invoices_issue_date ON invoices(issue_date);

            CREATE TABLE invoice_lines (
                id TEXT PRIMARY KEY,
                invoice_id TEXT NOT NULL,
                part_id TEXT,
                sku TEXT,
                description TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price TEXT NOT NULL,
                discount_percent TEXT NOT NULL DEFAULT '0',
                line_total TEXT NOT NULL,
                position INTEGER NOT NULL
            );

            CREATE INDEX idx_invoice_lines_invoice ON invoice_lines(invoice_id);
            "#,
        },
        Migration {
            version: 3,
            name: "expenses",
            sql: r#"
            CREATE TABLE expenses (
                id TEXT PRIMARY KEY,
                category TEXT NOT NULL DEFAULT '',
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                receipt_number TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX idx_expenses_date ON expenses(date);
            "#,
        },
        Migration {
            version: 4,
            name: "stock_movements",
            sql: r#"
            CREATE TABLE stock_movements (
                id TEXT PRIMARY KEY,
                part_id TEXT NOT NULL,
                change INTEGER NOT NULL,
                stock_after INTEGER NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );

            CREATE INDEX idx_stock_movements_part ON stock_movements(part_id);
            "#,
        },
        Migration {
            version: 5,
            name: "priority_storage_location_payload",
            sql: r#"
            ALTER TABLE orders ADD COLUMN priority INTEGER NOT NULL DEFAULT 2;
            ALTER TABLE parts ADD COLUMN storage_location TEXT NOT NULL DEFAULT '';
            ALTER TABLE settings ADD COLUMN payload BLOB;
            "#,
        },
    ]
}

/// Applies pending migrations against one database.
pub struct MigrationManager {
    pool: SqlitePool,
}

impl MigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Schema version of the connected database, 0 for a fresh file.
    pub async fn current_version(&self) -> AppResult<i64> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read schema version: {}", e)))?;

        Ok(version)
    }

    /// Apply every step newer than the stored version. Returns the number
    /// of applied steps.
    pub async fn run(&self) -> AppResult<u32> {
        let current = self.current_version().await?;
        let mut applied = 0;

        for migration in migrations() {
            if migration.version <= current {
                continue;
            }
            self.apply(&migration).await?;
            applied += 1;
        }

        Ok(applied)
    }

    async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to apply migration {}: {}",
                    migration.version, e
                ))
            })?;

        // PRAGMA takes no bound parameters.
        sqlx::query(&format!("PRAGMA user_version = {}", migration.version))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to bump schema version: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit migration: {}", e)))?;

        info!(
            version = migration.version,
            name = migration.name,
            "Migration applied"
        );

        Ok(())
    }
}
