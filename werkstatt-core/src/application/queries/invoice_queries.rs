//! Invoice queries

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use werkstatt_common::Pagination;
use werkstatt_domain_core::Money;

use crate::domain::entities::{BankDetails, CompanyProfile, InvoiceFilter};
use crate::domain::value_objects::InvoiceId;

/// Get invoice query
#[derive(Debug, Clone)]
pub struct GetInvoiceQuery {
    pub invoice_id: InvoiceId,
}

/// List invoices query
#[derive(Debug, Clone)]
pub struct ListInvoicesQuery {
    pub filter: InvoiceFilter,
    pub pagination: Pagination,
}

/// Printable document query
#[derive(Debug, Clone)]
pub struct GetInvoiceDocumentQuery {
    pub invoice_id: InvoiceId,
}

/// Everything a renderer needs to lay out the invoice. All amounts are
/// already rounded to two decimal places; no further arithmetic is
/// expected downstream.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDocument {
    pub number: String,
    pub issue_date: DateTime<Utc>,
    pub company: CompanyProfile,
    pub bank: BankDetails,
    pub customer: CustomerBlock,
    pub lines: Vec<DocumentLine>,
    pub subtotal: Money,
    pub discount_percent: Decimal,
    pub discount_amount: Money,
    pub net: Money,
    pub tax_rate_percent: Decimal,
    pub tax_amount: Money,
    pub grand_total: Money,
    pub paid: bool,
    pub notes: String,
}

/// Recipient address block. All fields are empty when the customer was
/// deleted after invoicing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerBlock {
    pub name: String,
    pub street: String,
    pub city_line: String,
}

/// One printable line
#[derive(Debug, Clone, Serialize)]
pub struct DocumentLine {
    pub position: i64,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub discount_percent: Decimal,
    pub line_total: Money,
}
