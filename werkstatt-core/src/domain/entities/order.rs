//! Work order aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use werkstatt_common::AuditInfo;
use werkstatt_domain_core::{AggregateRoot, Entity, Money};
use werkstatt_errors::{AppError, AppResult};

use crate::domain::enums::{OrderPriority, OrderStatus};
use crate::domain::pricing::LineItem;
use crate::domain::value_objects::{CustomerId, OrderId, OrderLineId, PartId, VehicleId};

/// A work order ("Auftrag") for one customer, optionally tied to one of
/// their vehicles.
///
/// Owns its lines in entry order. Status may be set freely in any
/// direction; the entity only maintains the completion timestamp, which
/// exists exactly while the status is `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    vehicle_id: Option<VehicleId>,
    title: String,
    description: String,
    status: OrderStatus,
    priority: OrderPriority,
    /// Booked labor time in hours.
    labor_hours: Decimal,
    notes: String,
    completed_at: Option<DateTime<Utc>>,
    lines: Vec<OrderLine>,
    audit_info: AuditInfo,
}

impl Order {
    pub fn new(
        customer_id: CustomerId,
        vehicle_id: Option<VehicleId>,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: OrderPriority,
    ) -> Self {
        Self {
            id: OrderId::new(),
            customer_id,
            vehicle_id,
            title: title.into(),
            description: description.into(),
            status: OrderStatus::Open,
            priority,
            labor_hours: Decimal::ZERO,
            notes: String::new(),
            completed_at: None,
            lines: Vec::new(),
            audit_info: AuditInfo::default(),
        }
    }

    /// Rebuild from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: OrderId,
        customer_id: CustomerId,
        vehicle_id: Option<VehicleId>,
        title: String,
        description: String,
        status: OrderStatus,
        priority: OrderPriority,
        labor_hours: Decimal,
        notes: String,
        completed_at: Option<DateTime<Utc>>,
        lines: Vec<OrderLine>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            customer_id,
            vehicle_id,
            title,
            description,
            status,
            priority,
            labor_hours,
            notes,
            completed_at,
            lines,
            audit_info,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn vehicle_id(&self) -> Option<&VehicleId> {
        self.vehicle_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn priority(&self) -> OrderPriority {
        self.priority
    }

    pub fn labor_hours(&self) -> Decimal {
        self.labor_hours
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    // ========== Updates ==========

    pub fn update_details(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.title = title.into();
        self.description = description.into();
        self.audit_info.touch();
    }

    pub fn set_priority(&mut self, priority: OrderPriority) {
        self.priority = priority;
        self.audit_info.touch();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.audit_info.touch();
    }

    pub fn set_labor_hours(&mut self, hours: Decimal) -> AppResult<()> {
        if hours.is_sign_negative() {
            return Err(AppError::validation(format!(
                "labor hours cannot be negative, got {}",
                hours
            )));
        }
        self.labor_hours = hours;
        self.audit_info.touch();
        Ok(())
    }

    /// Set the status. Any transition is allowed; the completion timestamp
    /// is set when the order first becomes `Completed` and cleared when it
    /// leaves `Completed` again.
    pub fn set_status(&mut self, status: OrderStatus) {
        if status.is_completed() {
            if !self.status.is_completed() {
                self.completed_at = Some(Utc::now());
            }
        } else {
            self.completed_at = None;
        }
        self.status = status;
        self.audit_info.touch();
    }

    pub fn is_open(&self) -> bool {
        !self.status.is_completed()
    }

    // ========== Lines ==========

    pub fn add_line(&mut self, line: OrderLine) {
        self.lines.push(line);
        self.audit_info.touch();
    }

    pub fn update_line(&mut self, line_id: &OrderLineId, item: LineItem) -> AppResult<&OrderLine> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.id() == line_id)
            .ok_or_else(|| AppError::not_found(format!("order line {} does not exist", line_id)))?;
        self.lines[pos].item = item;
        self.audit_info.touch();
        Ok(&self.lines[pos])
    }

    pub fn remove_line(&mut self, line_id: &OrderLineId) -> AppResult<OrderLine> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.id() == line_id)
            .ok_or_else(|| AppError::not_found(format!("order line {} does not exist", line_id)))?;
        let line = self.lines.remove(pos);
        self.audit_info.touch();
        Ok(line)
    }

    /// The payable items of this order, in entry order, without the labor
    /// line. Input for the totals aggregation.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines.iter().map(|l| l.item().clone()).collect()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Order {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// One part usage within an order.
///
/// The unit price is a snapshot of the part's sale price at the time the
/// line was added, not a live reference. Pricing rules live in the wrapped
/// [`LineItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    id: OrderLineId,
    order_id: OrderId,
    part_id: PartId,
    item: LineItem,
}

impl OrderLine {
    pub fn new(order_id: OrderId, part_id: PartId, item: LineItem) -> Self {
        Self {
            id: OrderLineId::new(),
            order_id,
            part_id,
            item,
        }
    }

    pub fn from_parts(id: OrderLineId, order_id: OrderId, part_id: PartId, item: LineItem) -> Self {
        Self {
            id,
            order_id,
            part_id,
            item,
        }
    }

    pub fn id(&self) -> &OrderLineId {
        &self.id
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn part_id(&self) -> &PartId {
        &self.part_id
    }

    pub fn item(&self) -> &LineItem {
        &self.item
    }

    pub fn description(&self) -> &str {
        self.item.description()
    }

    pub fn quantity(&self) -> i64 {
        self.item.quantity()
    }

    pub fn unit_price(&self) -> Money {
        self.item.unit_price()
    }

    pub fn discount_percent(&self) -> Decimal {
        self.item.discount_percent()
    }

    pub fn line_total(&self) -> Money {
        self.item.line_total()
    }
}

/// Order list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<CustomerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_order() -> Order {
        Order::new(
            CustomerId::new(),
            None,
            "Brake service",
            "Front brake pads and discs",
            OrderPriority::Normal,
        )
    }

    fn test_item(quantity: i64, price: &str) -> LineItem {
        LineItem::new("Part", quantity, price.parse().unwrap(), Decimal::ZERO).unwrap()
    }

    #[test]
    fn test_completion_timestamp_follows_status() {
        let mut order = test_order();
        assert!(order.completed_at().is_none());

        order.set_status(OrderStatus::Completed);
        let completed = order.completed_at();
        assert!(completed.is_some());

        // Completing an already completed order keeps the timestamp.
        order.set_status(OrderStatus::Completed);
        assert_eq!(order.completed_at(), completed);

        // Reopening clears it.
        order.set_status(OrderStatus::InProgress);
        assert!(order.completed_at().is_none());
        assert!(order.is_open());
    }

    #[test]
    fn test_any_status_transition_is_allowed() {
        let mut order = test_order();
        order.set_status(OrderStatus::Completed);
        order.set_status(OrderStatus::Open);
        order.set_status(OrderStatus::WaitingForParts);
        assert_eq!(order.status(), OrderStatus::WaitingForParts);
    }

    #[test]
    fn test_negative_labor_hours_rejected() {
        let mut order = test_order();
        assert!(order.set_labor_hours("-1".parse().unwrap()).is_err());
        assert!(order.set_labor_hours("2.5".parse().unwrap()).is_ok());
    }

    #[test]
    fn test_line_management() {
        let mut order = test_order();
        let part_id = PartId::new();

        let line = OrderLine::new(order.id().clone(), part_id.clone(), test_item(2, "10.00"));
        let line_id = line.id().clone();
        order.add_line(line);
        assert_eq!(order.lines().len(), 1);

        order.update_line(&line_id, test_item(3, "10.00")).unwrap();
        assert_eq!(order.lines()[0].quantity(), 3);

        let removed = order.remove_line(&line_id).unwrap();
        assert_eq!(removed.part_id(), &part_id);
        assert!(order.lines().is_empty());
    }

    #[test]
    fn test_missing_line_is_not_found() {
        let mut order = test_order();
        let result = order.update_line(&OrderLineId::new(), test_item(1, "1.00"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
