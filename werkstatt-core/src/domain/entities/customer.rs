//! Customer aggregate

use serde::{Deserialize, Serialize};
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::{AggregateRoot, Entity};

use crate::domain::value_objects::CustomerId;

/// A customer with contact data and address.
///
/// Owns vehicles and orders by reference. Deleting a customer is guarded
/// by the handler: it is refused while any non-completed order exists, and
/// otherwise removes the customer together with their vehicles. Completed
/// orders and issued invoices stay behind as history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    company: Option<String>,
    phone: String,
    email: String,
    street: String,
    postal_code: String,
    city: String,
    notes: String,
    audit_info: AuditInfo,
}

impl Customer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: None,
            phone: String::new(),
            email: String::new(),
            street: String::new(),
            postal_code: String::new(),
            city: String::new(),
            notes: String::new(),
            audit_info: AuditInfo::default(),
        }
    }

    /// Rebuild from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: CustomerId,
        first_name: String,
        last_name: String,
        company: Option<String>,
        phone: String,
        email: String,
        street: String,
        postal_code: String,
        city: String,
        notes: String,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            company,
            phone,
            email,
            street,
            postal_code,
            city,
            notes,
            audit_info,
        }
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    /// "First Last", or the company name when one is set.
    pub fn display_name(&self) -> String {
        match &self.company {
            Some(company) if !company.is_empty() => company.clone(),
            _ => format!("{} {}", self.first_name, self.last_name).trim().to_string(),
        }
    }

    // ========== Builders ==========

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = phone.into();
        self.email = email.into();
        self
    }

    pub fn with_address(
        mut self,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.street = street.into();
        self.postal_code = postal_code.into();
        self.city = city.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    // ========== Updates ==========

    pub fn update_name(&mut self, first_name: impl Into<String>, last_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.audit_info.touch();
    }

    pub fn update_company(&mut self, company: Option<String>) {
        self.company = company;
        self.audit_info.touch();
    }

    pub fn update_contact(&mut self, phone: impl Into<String>, email: impl Into<String>) {
        self.phone = phone.into();
        self.email = email.into();
        self.audit_info.touch();
    }

    pub fn update_address(
        &mut self,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) {
        self.street = street.into();
        self.postal_code = postal_code.into();
        self.city = city.into();
        self.audit_info.touch();
    }

    pub fn update_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.audit_info.touch();
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Customer {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// Customer list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerFilter {
    /// Matches against name, company and city.
    pub search_term: Option<String>,
}
