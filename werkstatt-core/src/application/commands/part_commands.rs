//! Spare part commands

use werkstatt_domain_core::Money;
use werkstatt_errors::AppResult;

use crate::domain::value_objects::PartId;

/// Create part command
#[derive(Debug, Clone)]
pub struct CreatePartCommand {
    pub sku: String,
    pub description: String,
    pub category: String,
    pub stock_quantity: i64,
    pub min_stock: i64,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub supplier: String,
    pub storage_location: String,
    pub unit: String,
}

impl CreatePartCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.description.trim().is_empty() {
            return Err(werkstatt_errors::AppError::validation(
                "part description cannot be empty",
            ));
        }
        if self.stock_quantity < 0 {
            return Err(werkstatt_errors::AppError::validation(
                "stock quantity cannot be negative",
            ));
        }
        if self.min_stock < 0 {
            return Err(werkstatt_errors::AppError::validation(
                "minimum stock cannot be negative",
            ));
        }
        validate_prices(self.purchase_price, self.sale_price)
    }
}

/// Update part command. The part number is fixed at creation.
#[derive(Debug, Clone)]
pub struct UpdatePartCommand {
    pub part_id: PartId,
    pub description: String,
    pub category: String,
    /// Absolute correction, e.g. after a physical count. `None` leaves the
    /// count alone; relative changes go through [`AdjustStockCommand`].
    pub stock_quantity: Option<i64>,
    pub min_stock: i64,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub supplier: String,
    pub storage_location: String,
    pub unit: String,
}

impl UpdatePartCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.description.trim().is_empty() {
            return Err(werkstatt_errors::AppError::validation(
                "part description cannot be empty",
            ));
        }
        if let Some(quantity) = self.stock_quantity {
            if quantity < 0 {
                return Err(werkstatt_errors::AppError::validation(
                    "stock quantity cannot be negative",
                ));
            }
        }
        if self.min_stock < 0 {
            return Err(werkstatt_errors::AppError::validation(
                "minimum stock cannot be negative",
            ));
        }
        validate_prices(self.purchase_price, self.sale_price)
    }
}

/// Relative stock change command
#[derive(Debug, Clone)]
pub struct AdjustStockCommand {
    pub part_id: PartId,
    pub change: i64,
    pub note: String,
}

impl AdjustStockCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.change == 0 {
            return Err(werkstatt_errors::AppError::validation(
                "stock change cannot be zero",
            ));
        }
        Ok(())
    }
}

/// Delete part command
#[derive(Debug, Clone)]
pub struct DeletePartCommand {
    pub part_id: PartId,
}

fn validate_prices(purchase_price: Money, sale_price: Money) -> AppResult<()> {
    if purchase_price.is_negative() {
        return Err(werkstatt_errors::AppError::validation(
            "purchase price cannot be negative",
        ));
    }
    if sale_price.is_negative() {
        return Err(werkstatt_errors::AppError::validation(
            "sale price cannot be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_stock_rejected() {
        let cmd = CreatePartCommand {
            sku: "BP-1044".to_string(),
            description: "Brake pad set".to_string(),
            category: String::new(),
            stock_quantity: -1,
            min_stock: 0,
            purchase_price: Money::ZERO,
            sale_price: Money::ZERO,
            supplier: String::new(),
            storage_location: String::new(),
            unit: "piece".to_string(),
        };
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn test_zero_adjustment_rejected() {
        let cmd = AdjustStockCommand {
            part_id: PartId::new(),
            change: 0,
            note: String::new(),
        };
        assert!(cmd.validate().is_err());
    }
}
