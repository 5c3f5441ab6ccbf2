//! Spare part queries

use werkstatt_common::Pagination;

use crate::domain::entities::PartFilter;
use crate::domain::value_objects::{PartId, Sku};

/// Get part query
#[derive(Debug, Clone)]
pub struct GetPartQuery {
    pub part_id: PartId,
}

/// Get part by number query
#[derive(Debug, Clone)]
pub struct GetPartBySkuQuery {
    pub sku: Sku,
}

/// List parts query
#[derive(Debug, Clone)]
pub struct ListPartsQuery {
    pub filter: PartFilter,
    pub pagination: Pagination,
}

/// Movement history query
#[derive(Debug, Clone)]
pub struct ListStockMovementsQuery {
    pub part_id: PartId,
    pub pagination: Pagination,
}
