//! Work order commands

use rust_decimal::Decimal;
use werkstatt_domain_core::Money;
use werkstatt_errors::AppResult;

use crate::domain::enums::{OrderPriority, OrderStatus};
use crate::domain::value_objects::{CustomerId, OrderId, OrderLineId, PartId, VehicleId};

/// Create order command
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub customer_id: CustomerId,
    pub vehicle_id: Option<VehicleId>,
    pub title: String,
    pub description: String,
    pub priority: OrderPriority,
    pub labor_hours: Decimal,
}

impl CreateOrderCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(werkstatt_errors::AppError::validation(
                "order title cannot be empty",
            ));
        }
        validate_labor_hours(self.labor_hours)
    }
}

/// Update order command
#[derive(Debug, Clone)]
pub struct UpdateOrderCommand {
    pub order_id: OrderId,
    pub title: String,
    pub description: String,
    pub notes: String,
    pub priority: OrderPriority,
    pub labor_hours: Decimal,
}

impl UpdateOrderCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(werkstatt_errors::AppError::validation(
                "order title cannot be empty",
            ));
        }
        validate_labor_hours(self.labor_hours)
    }
}

/// Status change command
#[derive(Debug, Clone)]
pub struct SetOrderStatusCommand {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Add line command. Without an explicit unit price the part's current
/// sale price is copied in.
#[derive(Debug, Clone)]
pub struct AddOrderLineCommand {
    pub order_id: OrderId,
    pub part_id: PartId,
    pub quantity: i64,
    pub discount_percent: Decimal,
    pub unit_price: Option<Money>,
}

impl AddOrderLineCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_line_fields(self.quantity, self.discount_percent, self.unit_price)
    }
}

/// Update line command
#[derive(Debug, Clone)]
pub struct UpdateOrderLineCommand {
    pub order_id: OrderId,
    pub line_id: OrderLineId,
    pub quantity: i64,
    pub discount_percent: Decimal,
    pub unit_price: Money,
}

impl UpdateOrderLineCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_line_fields(self.quantity, self.discount_percent, Some(self.unit_price))
    }
}

/// Remove line command
#[derive(Debug, Clone)]
pub struct RemoveOrderLineCommand {
    pub order_id: OrderId,
    pub line_id: OrderLineId,
}

/// Delete order command
#[derive(Debug, Clone)]
pub struct DeleteOrderCommand {
    pub order_id: OrderId,
}

fn validate_labor_hours(hours: Decimal) -> AppResult<()> {
    if hours.is_sign_negative() {
        return Err(werkstatt_errors::AppError::validation(format!(
            "labor hours cannot be negative, got {}",
            hours
        )));
    }
    Ok(())
}

fn validate_line_fields(
    quantity: i64,
    discount_percent: Decimal,
    unit_price: Option<Money>,
) -> AppResult<()> {
    if quantity <= 0 {
        return Err(werkstatt_errors::AppError::validation(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if discount_percent.is_sign_negative() || discount_percent > Decimal::ONE_HUNDRED {
        return Err(werkstatt_errors::AppError::validation(format!(
            "discount must be between 0 and 100 percent, got {}",
            discount_percent
        )));
    }
    if let Some(price) = unit_price {
        if price.is_negative() {
            return Err(werkstatt_errors::AppError::validation(
                "unit price cannot be negative",
            ));
        }
    }
    Ok(())
}
