//! Expense queries

use werkstatt_common::Pagination;

use crate::domain::entities::ExpenseFilter;
use crate::domain::value_objects::ExpenseId;

/// Get expense query
#[derive(Debug, Clone)]
pub struct GetExpenseQuery {
    pub expense_id: ExpenseId,
}

/// List expenses query
#[derive(Debug, Clone)]
pub struct ListExpensesQuery {
    pub filter: ExpenseFilter,
    pub pagination: Pagination,
}
