//! Invoice aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::{AggregateRoot, Entity, Money};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::enums::PaymentMethod;
use crate::domain::pricing::{LineItem, TotalsBreakdown};
use crate::domain::value_objects::{InvoiceId, InvoiceLineId, InvoiceNumber, OrderId, PartId, Sku};

/// A finalized invoice for one work order.
///
/// All amounts and lines are copied out of the order at creation time.
/// Later edits to the order, its parts or the pricing settings leave the
/// invoice untouched. Amounts are stored rounded to two decimal places.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    order_id: OrderId,
    number: InvoiceNumber,
    issue_date: DateTime<Utc>,
    lines: Vec<InvoiceLine>,
    subtotal: Money,
    discount_percent: Decimal,
    discount_amount: Money,
    net: Money,
    tax_rate_percent: Decimal,
    tax_amount: Money,
    grand_total: Money,
    paid: bool,
    paid_at: Option<DateTime<Utc>>,
    payment_method: Option<PaymentMethod>,
    notes: String,
    audit_info: AuditInfo,
}

impl Invoice {
    pub fn new(order_id: OrderId, number: InvoiceNumber, totals: &TotalsBreakdown) -> Self {
        Self {
            id: InvoiceId::new(),
            order_id,
            number,
            issue_date: Utc::now(),
            lines: Vec::new(),
            subtotal: totals.subtotal,
            discount_percent: totals.discount_percent,
            discount_amount: totals.discount_amount,
            net: totals.net,
            tax_rate_percent: totals.tax_rate_percent,
            tax_amount: totals.tax_amount,
            grand_total: totals.grand_total,
            paid: false,
            paid_at: None,
            payment_method: None,
            notes: String::new(),
            audit_info: AuditInfo::default(),
        }
    }

    /// Rebuild from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: InvoiceId,
        order_id: OrderId,
        number: InvoiceNumber,
        issue_date: DateTime<Utc>,
        lines: Vec<InvoiceLine>,
        subtotal: Money,
        discount_percent: Decimal,
        discount_amount: Money,
        net: Money,
        tax_rate_percent: Decimal,
        tax_amount: Money,
        grand_total: Money,
        paid: bool,
        paid_at: Option<DateTime<Utc>>,
        payment_method: Option<PaymentMethod>,
        notes: String,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            order_id,
            number,
            issue_date,
            lines,
            subtotal,
            discount_percent,
            discount_amount,
            net,
            tax_rate_percent,
            tax_amount,
            grand_total,
            paid,
            paid_at,
            payment_method,
            notes,
            audit_info,
        }
    }

    pub fn id(&self) -> &InvoiceId {
        &self.id
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    pub fn issue_date(&self) -> DateTime<Utc> {
        self.issue_date
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn discount_amount(&self) -> Money {
        self.discount_amount
    }

    pub fn net(&self) -> Money {
        self.net
    }

    pub fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }

    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    pub fn grand_total(&self) -> Money {
        self.grand_total
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    /// Append a snapshot line. Positions are assigned in entry order,
    /// starting at 1.
    pub fn add_line(&mut self, part_id: Option<PartId>, sku: Option<Sku>, item: &LineItem) {
        let position = self.lines.len() as i64 + 1;
        self.lines
            .push(InvoiceLine::new(self.id.clone(), part_id, sku, item, position));
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.audit_info.touch();
    }

    /// Record the payment. Paid is a one-way state; paying twice is a
    /// bookkeeping error and is rejected.
    pub fn mark_paid(&mut self, method: PaymentMethod) -> AppResult<()> {
        if self.paid {
            return Err(AppError::constraint(format!(
                "invoice {} is already marked as paid",
                self.number
            )));
        }
        self.paid = true;
        self.paid_at = Some(Utc::now());
        self.payment_method = Some(method);
        self.audit_info.touch();
        Ok(())
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Invoice {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// One line of an invoice, frozen at creation time.
///
/// `part_id` and `sku` are kept for reference only; the labor line and
/// lines whose part was deleted later carry neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    id: InvoiceLineId,
    invoice_id: InvoiceId,
    part_id: Option<PartId>,
    sku: Option<Sku>,
    description: String,
    quantity: i64,
    unit_price: Money,
    discount_percent: Decimal,
    line_total: Money,
    position: i64,
}

impl InvoiceLine {
    pub fn new(
        invoice_id: InvoiceId,
        part_id: Option<PartId>,
        sku: Option<Sku>,
        item: &LineItem,
        position: i64,
    ) -> Self {
        Self {
            id: InvoiceLineId::new(),
            invoice_id,
            part_id,
            sku,
            description: item.description().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            discount_percent: item.discount_percent(),
            line_total: item.rounded_total(),
            position,
        }
    }

    /// Rebuild from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: InvoiceLineId,
        invoice_id: InvoiceId,
        part_id: Option<PartId>,
        sku: Option<Sku>,
        description: String,
        quantity: i64,
        unit_price: Money,
        discount_percent: Decimal,
        line_total: Money,
        position: i64,
    ) -> Self {
        Self {
            id,
            invoice_id,
            part_id,
            sku,
            description,
            quantity,
            unit_price,
            discount_percent,
            line_total,
            position,
        }
    }

    pub fn id(&self) -> &InvoiceLineId {
        &self.id
    }

    pub fn invoice_id(&self) -> &InvoiceId {
        &self.invoice_id
    }

    pub fn part_id(&self) -> Option<&PartId> {
        self.part_id.as_ref()
    }

    pub fn sku(&self) -> Option<&Sku> {
        self.sku.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }

    pub fn position(&self) -> i64 {
        self.position
    }
}

/// Invoice list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceFilter {
    pub unpaid_only: bool,
    pub year: Option<i32>,
}

/// Lightweight revenue projection for reporting queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub issue_date: DateTime<Utc>,
    pub grand_total: Money,
    pub paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::{OrderTotals, PricingSettings};

    fn test_invoice() -> Invoice {
        let settings = PricingSettings::new("60".parse().unwrap(), "7.7".parse().unwrap());
        let items = vec![
            LineItem::new("Oil filter", 1, "18.50".parse().unwrap(), Decimal::ZERO).unwrap(),
        ];
        let totals = OrderTotals::compute(&items, "1.5".parse().unwrap(), Decimal::ZERO, &settings)
            .unwrap()
            .rounded();
        Invoice::new(
            OrderId::new(),
            InvoiceNumber::new(2026, 1),
            &totals,
        )
    }

    #[test]
    fn test_mark_paid_is_one_way() {
        let mut invoice = test_invoice();
        assert!(!invoice.is_paid());

        invoice.mark_paid(PaymentMethod::Card).unwrap();
        assert!(invoice.is_paid());
        assert!(invoice.paid_at().is_some());
        assert_eq!(invoice.payment_method(), Some(PaymentMethod::Card));

        let again = invoice.mark_paid(PaymentMethod::Cash);
        assert!(matches!(again, Err(AppError::Constraint(_))));
        // The original payment record is untouched.
        assert_eq!(invoice.payment_method(), Some(PaymentMethod::Card));
    }

    #[test]
    fn test_lines_are_positioned_in_entry_order() {
        let mut invoice = test_invoice();
        let item_a = LineItem::new("Oil filter", 1, "18.50".parse().unwrap(), Decimal::ZERO).unwrap();
        let item_b = LineItem::new("Labor (1.5 h)", 1, "90".parse().unwrap(), Decimal::ZERO).unwrap();

        invoice.add_line(Some(PartId::new()), Some(Sku::new("OF-220").unwrap()), &item_a);
        invoice.add_line(None, None, &item_b);

        assert_eq!(invoice.lines()[0].position(), 1);
        assert_eq!(invoice.lines()[1].position(), 2);
        assert!(invoice.lines()[1].part_id().is_none());
        assert_eq!(invoice.lines()[0].line_total().to_string(), "18.50");
    }
}
