//! Database row mappings
//!
//! Ids and amounts are stored as TEXT; the converters parse them back into
//! their domain types and report corrupt values as database errors.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct VehicleRow {
    pub id: String,
    pub customer_id: String,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct PartRow {
    pub id: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub stock_quantity: i64,
    pub min_stock: i64,
    pub purchase_price: String,
    pub sale_price: String,
    pub supplier: String,
    pub storage_location: String,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct StockMovementRow {
    pub id: String,
    pub part_id: String,
    pub change: i64,
    pub stock_after: i64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: String,
    pub customer_id: String,
    pub vehicle_id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: i64,
    pub priority: i64,
    pub labor_hours: String,
    pub notes: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct OrderLineRow {
    pub id: String,
    pub order_id: String,
    pub part_id: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: String,
    pub discount_percent: String,
}

#[derive(Debug, FromRow)]
pub struct InvoiceRow {
    pub id: String,
    pub order_id: String,
    pub number: String,
    pub issue_date: DateTime<Utc>,
    pub subtotal: String,
    pub discount_percent: String,
    pub discount_amount: String,
    pub net: String,
    pub tax_rate_percent: String,
    pub tax_amount: String,
    pub grand_total: String,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct InvoiceLineRow {
    pub id: String,
    pub invoice_id: String,
    pub part_id: Option<String>,
    pub sku: Option<String>,
    pub description: String,
    pub quantity: i64,
    pub unit_price: String,
    pub discount_percent: String,
    pub line_total: String,
    pub position: i64,
}

/// Projection for revenue reporting; skips the line loading.
#[derive(Debug, FromRow)]
pub struct InvoiceSummaryRow {
    pub issue_date: DateTime<Utc>,
    pub grand_total: String,
    pub paid: bool,
}

#[derive(Debug, FromRow)]
pub struct ExpenseRow {
    pub id: String,
    pub category: String,
    pub amount: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub receipt_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}
