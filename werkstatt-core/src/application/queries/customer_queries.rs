//! Customer queries

use werkstatt_common::Pagination;

use crate::domain::entities::CustomerFilter;
use crate::domain::value_objects::CustomerId;

/// Get customer query
#[derive(Debug, Clone)]
pub struct GetCustomerQuery {
    pub customer_id: CustomerId,
}

/// List customers query
#[derive(Debug, Clone)]
pub struct ListCustomersQuery {
    pub filter: CustomerFilter,
    pub pagination: Pagination,
}
