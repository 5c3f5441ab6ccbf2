//! Spare part aggregate

use serde::{Deserialize, Serialize};
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::{AggregateRoot, Entity, Money};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::value_objects::{PartId, Sku};

/// A spare part in the shop's own inventory.
///
/// Stock is a plain count of the stocking unit. It never goes below zero;
/// consuming more than is on hand clamps at zero instead of failing, since
/// the physical parts were evidently there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    id: PartId,
    sku: Sku,
    description: String,
    category: String,
    stock_quantity: i64,
    min_stock: i64,
    purchase_price: Money,
    sale_price: Money,
    supplier: String,
    storage_location: String,
    /// Stocking unit, e.g. "piece", "litre", "set".
    unit: String,
    audit_info: AuditInfo,
}

impl Part {
    pub fn new(
        sku: Sku,
        description: impl Into<String>,
        purchase_price: Money,
        sale_price: Money,
    ) -> Self {
        Self {
            id: PartId::new(),
            sku,
            description: description.into(),
            category: String::new(),
            stock_quantity: 0,
            min_stock: 0,
            purchase_price,
            sale_price,
            supplier: String::new(),
            storage_location: String::new(),
            unit: "piece".to_string(),
            audit_info: AuditInfo::default(),
        }
    }

    /// Rebuild from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PartId,
        sku: Sku,
        description: String,
        category: String,
        stock_quantity: i64,
        min_stock: i64,
        purchase_price: Money,
        sale_price: Money,
        supplier: String,
        storage_location: String,
        unit: String,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            sku,
            description,
            category,
            stock_quantity,
            min_stock,
            purchase_price,
            sale_price,
            supplier,
            storage_location,
            unit,
            audit_info,
        }
    }

    pub fn id(&self) -> &PartId {
        &self.id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    pub fn purchase_price(&self) -> Money {
        self.purchase_price
    }

    pub fn sale_price(&self) -> Money {
        self.sale_price
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn storage_location(&self) -> &str {
        &self.storage_location
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    /// Stock has fallen to or below the reorder threshold. A threshold of
    /// zero disables the warning.
    pub fn is_below_minimum(&self) -> bool {
        self.min_stock > 0 && self.stock_quantity <= self.min_stock
    }

    // ========== Builders ==========

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, quantity: i64, min_stock: i64) -> Self {
        self.stock_quantity = quantity.max(0);
        self.min_stock = min_stock.max(0);
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn with_storage_location(mut self, location: impl Into<String>) -> Self {
        self.storage_location = location.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    // ========== Updates ==========

    pub fn update_details(
        &mut self,
        description: impl Into<String>,
        category: impl Into<String>,
        supplier: impl Into<String>,
        storage_location: impl Into<String>,
        unit: impl Into<String>,
    ) {
        self.description = description.into();
        self.category = category.into();
        self.supplier = supplier.into();
        self.storage_location = storage_location.into();
        self.unit = unit.into();
        self.audit_info.touch();
    }

    pub fn update_prices(&mut self, purchase_price: Money, sale_price: Money) {
        self.purchase_price = purchase_price;
        self.sale_price = sale_price;
        self.audit_info.touch();
    }

    pub fn set_min_stock(&mut self, min_stock: i64) -> AppResult<()> {
        if min_stock < 0 {
            return Err(AppError::validation(format!(
                "minimum stock cannot be negative, got {}",
                min_stock
            )));
        }
        self.min_stock = min_stock;
        self.audit_info.touch();
        Ok(())
    }

    /// Apply a relative stock change and return the change that was
    /// actually applied. A withdrawal past zero is clamped, so the applied
    /// change can be smaller in magnitude than the requested one.
    pub fn adjust_stock(&mut self, change: i64) -> i64 {
        let new_quantity = self.stock_quantity.saturating_add(change).max(0);
        let applied = new_quantity - self.stock_quantity;
        self.stock_quantity = new_quantity;
        self.audit_info.touch();
        applied
    }

    /// Overwrite the stock count, e.g. after a physical inventory count.
    pub fn set_stock(&mut self, quantity: i64) -> AppResult<()> {
        if quantity < 0 {
            return Err(AppError::validation(format!(
                "stock quantity cannot be negative, got {}",
                quantity
            )));
        }
        self.stock_quantity = quantity;
        self.audit_info.touch();
        Ok(())
    }
}

impl Entity for Part {
    type Id = PartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Part {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// Part list filter. `search_term` matches number and description,
/// `below_minimum` keeps only parts at or under their reorder threshold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartFilter {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub below_minimum: bool,
}
