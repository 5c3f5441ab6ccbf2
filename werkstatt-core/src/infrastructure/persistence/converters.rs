//! Database rows to domain objects
//!
//! Stored values were validated when they were written, so a parse failure
//! here means the file was edited or damaged outside the application. Such
//! values surface as database errors naming the offending column.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::Money;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{
    Customer, Expense, Invoice, InvoiceLine, InvoiceSummary, Order, OrderLine, Part, Setting,
    StockMovement, Vehicle,
};
use crate::domain::enums::{OrderPriority, OrderStatus, PaymentMethod};
use crate::domain::pricing::LineItem;
use crate::domain::value_objects::{
    CustomerId, ExpenseId, InvoiceId, InvoiceLineId, InvoiceNumber, OrderId, OrderLineId, PartId,
    Sku, StockMovementId, VehicleId,
};

use super::rows::{
    CustomerRow, ExpenseRow, InvoiceLineRow, InvoiceRow, InvoiceSummaryRow, OrderLineRow, OrderRow,
    PartRow, SettingRow, StockMovementRow, VehicleRow,
};

pub fn customer_from_row(row: CustomerRow) -> AppResult<Customer> {
    Ok(Customer::from_parts(
        CustomerId::from_uuid(parse_uuid(&row.id, "customers.id")?),
        row.first_name,
        row.last_name,
        row.company,
        row.phone,
        row.email,
        row.street,
        row.postal_code,
        row.city,
        row.notes,
        AuditInfo::from_parts(row.created_at, row.updated_at),
    ))
}

pub fn vehicle_from_row(row: VehicleRow) -> AppResult<Vehicle> {
    Ok(Vehicle::from_parts(
        VehicleId::from_uuid(parse_uuid(&row.id, "vehicles.id")?),
        CustomerId::from_uuid(parse_uuid(&row.customer_id, "vehicles.customer_id")?),
        row.make,
        row.model,
        row.license_plate,
        row.vin,
        row.year,
        AuditInfo::from_parts(row.created_at, row.updated_at),
    ))
}

pub fn part_from_row(row: PartRow) -> AppResult<Part> {
    let sku = Sku::new(row.sku)
        .map_err(|e| AppError::database(format!("Corrupt value in parts.sku: {}", e)))?;

    Ok(Part::from_parts(
        PartId::from_uuid(parse_uuid(&row.id, "parts.id")?),
        sku,
        row.description,
        row.category,
        row.stock_quantity,
        row.min_stock,
        parse_money(&row.purchase_price, "parts.purchase_price")?,
        parse_money(&row.sale_price, "parts.sale_price")?,
        row.supplier,
        row.storage_location,
        row.unit,
        AuditInfo::from_parts(row.created_at, row.updated_at),
    ))
}

pub fn stock_movement_from_row(row: StockMovementRow) -> AppResult<StockMovement> {
    Ok(StockMovement::from_parts(
        StockMovementId::from_uuid(parse_uuid(&row.id, "stock_movements.id")?),
        PartId::from_uuid(parse_uuid(&row.part_id, "stock_movements.part_id")?),
        row.change,
        row.stock_after,
        row.note,
        row.created_at,
    ))
}

pub fn order_from_row(row: OrderRow, lines: Vec<OrderLine>) -> AppResult<Order> {
    let status = OrderStatus::from_code(row.status)
        .ok_or_else(|| AppError::database(format!("Unknown order status code {}", row.status)))?;
    let priority = OrderPriority::from_code(row.priority).ok_or_else(|| {
        AppError::database(format!("Unknown order priority code {}", row.priority))
    })?;

    Ok(Order::from_parts(
        OrderId::from_uuid(parse_uuid(&row.id, "orders.id")?),
        CustomerId::from_uuid(parse_uuid(&row.customer_id, "orders.customer_id")?),
        row.vehicle_id
            .as_deref()
            .map(|id| parse_uuid(id, "orders.vehicle_id").map(VehicleId::from_uuid))
            .transpose()?,
        row.title,
        row.description,
        status,
        priority,
        parse_decimal(&row.labor_hours, "orders.labor_hours")?,
        row.notes,
        row.completed_at,
        lines,
        AuditInfo::from_parts(row.created_at, row.updated_at),
    ))
}

pub fn order_line_from_row(row: OrderLineRow) -> AppResult<OrderLine> {
    let item = LineItem::new(
        row.description,
        row.quantity,
        parse_money(&row.unit_price, "order_lines.unit_price")?,
        parse_decimal(&row.discount_percent, "order_lines.discount_percent")?,
    )
    .map_err(|e| AppError::database(format!("Corrupt order line {}: {}", row.id, e)))?;

    Ok(OrderLine::from_parts(
        OrderLineId::from_uuid(parse_uuid(&row.id, "order_lines.id")?),
        OrderId::from_uuid(parse_uuid(&row.order_id, "order_lines.order_id")?),
        PartId::from_uuid(parse_uuid(&row.part_id, "order_lines.part_id")?),
        item,
    ))
}

pub fn invoice_from_row(row: InvoiceRow, lines: Vec<InvoiceLine>) -> AppResult<Invoice> {
    let number = InvoiceNumber::parse(&row.number)
        .map_err(|e| AppError::database(format!("Corrupt value in invoices.number: {}", e)))?;
    let payment_method = row
        .payment_method
        .as_deref()
        .map(|code| {
            PaymentMethod::from_code(code)
                .ok_or_else(|| AppError::database(format!("Unknown payment method code {code:?}")))
        })
        .transpose()?;

    Ok(Invoice::from_parts(
        InvoiceId::from_uuid(parse_uuid(&row.id, "invoices.id")?),
        OrderId::from_uuid(parse_uuid(&row.order_id, "invoices.order_id")?),
        number,
        row.issue_date,
        lines,
        parse_money(&row.subtotal, "invoices.subtotal")?,
        parse_decimal(&row.discount_percent, "invoices.discount_percent")?,
        parse_money(&row.discount_amount, "invoices.discount_amount")?,
        parse_money(&row.net, "invoices.net")?,
        parse_decimal(&row.tax_rate_percent, "invoices.tax_rate_percent")?,
        parse_money(&row.tax_amount, "invoices.tax_amount")?,
        parse_money(&row.grand_total, "invoices.grand_total")?,
        row.paid,
        row.paid_at,
        payment_method,
        row.notes,
        AuditInfo::from_parts(row.created_at, row.updated_at),
    ))
}

pub fn invoice_line_from_row(row: InvoiceLineRow) -> AppResult<InvoiceLine> {
    let sku = row
        .sku
        .map(|value| {
            Sku::new(value)
                .map_err(|e| AppError::database(format!("Corrupt value in invoice_lines.sku: {}", e)))
        })
        .transpose()?;

    Ok(InvoiceLine::from_parts(
        InvoiceLineId::from_uuid(parse_uuid(&row.id, "invoice_lines.id")?),
        InvoiceId::from_uuid(parse_uuid(&row.invoice_id, "invoice_lines.invoice_id")?),
        row.part_id
            .as_deref()
            .map(|id| parse_uuid(id, "invoice_lines.part_id").map(PartId::from_uuid))
            .transpose()?,
        sku,
        row.description,
        row.quantity,
        parse_money(&row.unit_price, "invoice_lines.unit_price")?,
        parse_decimal(&row.discount_percent, "invoice_lines.discount_percent")?,
        parse_money(&row.line_total, "invoice_lines.line_total")?,
        row.position,
    ))
}

pub fn invoice_summary_from_row(row: InvoiceSummaryRow) -> AppResult<InvoiceSummary> {
    Ok(InvoiceSummary {
        issue_date: row.issue_date,
        grand_total: parse_money(&row.grand_total, "invoices.grand_total")?,
        paid: row.paid,
    })
}

pub fn expense_from_row(row: ExpenseRow) -> AppResult<Expense> {
    Ok(Expense::from_parts(
        ExpenseId::from_uuid(parse_uuid(&row.id, "expenses.id")?),
        row.category,
        parse_money(&row.amount, "expenses.amount")?,
        row.date,
        row.description,
        row.receipt_number,
        AuditInfo::from_parts(row.created_at, row.updated_at),
    ))
}

pub fn setting_from_row(row: SettingRow) -> Setting {
    Setting {
        key: row.key,
        value: row.value,
        description: row.description,
        updated_at: row.updated_at,
    }
}

fn parse_uuid(value: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Corrupt id in {}: {}", column, e)))
}

fn parse_money(value: &str, column: &str) -> AppResult<Money> {
    Money::from_str(value)
        .map_err(|e| AppError::database(format!("Corrupt amount in {}: {}", column, e)))
}

fn parse_decimal(value: &str, column: &str) -> AppResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| AppError::database(format!("Corrupt number in {}: {}", column, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_corrupt_amount_reported_as_database_error() {
        let row = ExpenseRow {
            id: Uuid::now_v7().to_string(),
            category: "Rent".to_string(),
            amount: "not-a-number".to_string(),
            date: Utc::now(),
            description: String::new(),
            receipt_number: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let err = expense_from_row(row).unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("expenses.amount"));
    }

    #[test]
    fn test_unknown_status_code_rejected() {
        let row = OrderRow {
            id: Uuid::now_v7().to_string(),
            customer_id: Uuid::now_v7().to_string(),
            vehicle_id: None,
            title: "Brake service".to_string(),
            description: String::new(),
            status: 99,
            priority: 2,
            labor_hours: "0".to_string(),
            notes: String::new(),
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let err = order_from_row(row, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("status code 99"));
    }
}
