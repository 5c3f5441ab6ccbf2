//! Operating expense record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::{AggregateRoot, Entity, Money};

use crate::domain::value_objects::ExpenseId;

/// A business expense outside of parts purchasing, e.g. rent, tools or
/// insurance. Feeds the expense side of the profit and loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    category: String,
    amount: Money,
    date: DateTime<Utc>,
    description: String,
    /// Reference on the paper or PDF receipt, if any.
    receipt_number: String,
    audit_info: AuditInfo,
}

impl Expense {
    pub fn new(
        category: impl Into<String>,
        amount: Money,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            category: category.into(),
            amount,
            date,
            description: description.into(),
            receipt_number: String::new(),
            audit_info: AuditInfo::default(),
        }
    }

    /// Rebuild from stored parts.
    pub fn from_parts(
        id: ExpenseId,
        category: String,
        amount: Money,
        date: DateTime<Utc>,
        description: String,
        receipt_number: String,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            category,
            amount,
            date,
            description,
            receipt_number,
            audit_info,
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    pub fn with_receipt_number(mut self, receipt_number: impl Into<String>) -> Self {
        self.receipt_number = receipt_number.into();
        self
    }

    pub fn update(
        &mut self,
        category: impl Into<String>,
        amount: Money,
        date: DateTime<Utc>,
        description: impl Into<String>,
        receipt_number: impl Into<String>,
    ) {
        self.category = category.into();
        self.amount = amount;
        self.date = date;
        self.description = description.into();
        self.receipt_number = receipt_number.into();
        self.audit_info.touch();
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Expense {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// Expense list filter. The date bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub category: Option<String>,
}
