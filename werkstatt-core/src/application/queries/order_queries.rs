//! Work order queries

use werkstatt_common::Pagination;

use crate::domain::entities::OrderFilter;
use crate::domain::value_objects::OrderId;

/// Get order query
#[derive(Debug, Clone)]
pub struct GetOrderQuery {
    pub order_id: OrderId,
}

/// List orders query
#[derive(Debug, Clone)]
pub struct ListOrdersQuery {
    pub filter: OrderFilter,
    pub pagination: Pagination,
}

/// Preview of what the order would cost at current prices and settings
#[derive(Debug, Clone)]
pub struct GetOrderTotalsQuery {
    pub order_id: OrderId,
}
