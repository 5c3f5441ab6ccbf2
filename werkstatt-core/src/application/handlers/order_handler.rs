//! Work order handler

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use werkstatt_common::PagedResult;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{Order, OrderLine};
use crate::domain::pricing::{LineItem, OrderTotals, TotalsBreakdown};
use crate::domain::repositories::{
    CustomerRepository, InvoiceRepository, OrderRepository, PartRepository, SettingRepository,
    VehicleRepository,
};
use crate::domain::value_objects::{OrderId, OrderLineId};

use crate::application::commands::*;
use crate::application::queries::*;

use super::load_pricing_settings;

pub struct OrderHandler {
    order_repo: Arc<dyn OrderRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    part_repo: Arc<dyn PartRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    setting_repo: Arc<dyn SettingRepository>,
}

impl OrderHandler {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        part_repo: Arc<dyn PartRepository>,
        invoice_repo: Arc<dyn InvoiceRepository>,
        setting_repo: Arc<dyn SettingRepository>,
    ) -> Self {
        Self {
            order_repo,
            customer_repo,
            vehicle_repo,
            part_repo,
            invoice_repo,
            setting_repo,
        }
    }

    /// Create an order
    pub async fn create(&self, cmd: CreateOrderCommand) -> AppResult<OrderId> {
        info!(
            "Creating order '{}' for customer: {}",
            cmd.title, cmd.customer_id.0
        );
        cmd.validate()?;

        if self
            .customer_repo
            .find_by_id(&cmd.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(format!(
                "customer {} does not exist",
                cmd.customer_id
            )));
        }

        if let Some(vehicle_id) = &cmd.vehicle_id {
            let vehicle = self
                .vehicle_repo
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("vehicle {} does not exist", vehicle_id))
                })?;
            if vehicle.customer_id() != &cmd.customer_id {
                return Err(AppError::validation(format!(
                    "vehicle '{}' belongs to a different customer",
                    vehicle.display_name()
                )));
            }
        }

        let mut order = Order::new(
            cmd.customer_id,
            cmd.vehicle_id,
            cmd.title,
            cmd.description,
            cmd.priority,
        );
        order.set_labor_hours(cmd.labor_hours)?;

        self.order_repo.save(&order).await?;

        info!("Order created: {}", order.id().0);
        Ok(order.id().clone())
    }

    /// Update title, description, notes, priority and labor hours
    pub async fn update(&self, cmd: UpdateOrderCommand) -> AppResult<()> {
        cmd.validate()?;

        let mut order = self.load(&cmd.order_id).await?;
        order.update_details(cmd.title, cmd.description);
        order.set_notes(cmd.notes);
        order.set_priority(cmd.priority);
        order.set_labor_hours(cmd.labor_hours)?;

        self.order_repo.update(&order).await?;

        info!("Order updated: {}", cmd.order_id.0);
        Ok(())
    }

    /// Set the status. Transitions are unrestricted in both directions.
    pub async fn set_status(&self, cmd: SetOrderStatusCommand) -> AppResult<()> {
        let mut order = self.load(&cmd.order_id).await?;
        order.set_status(cmd.status);

        self.order_repo.update(&order).await?;

        info!("Order {} status set to {:?}", cmd.order_id.0, cmd.status);
        Ok(())
    }

    /// Add a part line, snapshotting the part's sale price unless the
    /// command overrides it.
    pub async fn add_line(&self, cmd: AddOrderLineCommand) -> AppResult<OrderLineId> {
        cmd.validate()?;

        let mut order = self.load(&cmd.order_id).await?;
        let part = self
            .part_repo
            .find_by_id(&cmd.part_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("part {} does not exist", cmd.part_id)))?;

        let unit_price = cmd.unit_price.unwrap_or(part.sale_price());
        let item = LineItem::new(
            part.description(),
            cmd.quantity,
            unit_price,
            cmd.discount_percent,
        )?;

        let line = OrderLine::new(cmd.order_id.clone(), cmd.part_id.clone(), item);
        let line_id = line.id().clone();
        self.order_repo.add_line(&line).await?;
        order.add_line(line);
        self.order_repo.update(&order).await?;

        info!("Line added to order {}: {}", cmd.order_id.0, line_id.0);
        Ok(line_id)
    }

    /// Change quantity, unit price or discount of a line. The description
    /// keeps the snapshot taken when the line was added.
    pub async fn update_line(&self, cmd: UpdateOrderLineCommand) -> AppResult<()> {
        cmd.validate()?;

        let mut order = self.load(&cmd.order_id).await?;
        let description = order
            .lines()
            .iter()
            .find(|l| l.id() == &cmd.line_id)
            .map(|l| l.description().to_string())
            .ok_or_else(|| {
                AppError::not_found(format!("order line {} does not exist", cmd.line_id))
            })?;

        let item = LineItem::new(description, cmd.quantity, cmd.unit_price, cmd.discount_percent)?;
        let line = order.update_line(&cmd.line_id, item)?.clone();

        self.order_repo.update_line(&line).await?;
        self.order_repo.update(&order).await?;
        Ok(())
    }

    /// Remove a line
    pub async fn remove_line(&self, cmd: RemoveOrderLineCommand) -> AppResult<()> {
        let mut order = self.load(&cmd.order_id).await?;
        order.remove_line(&cmd.line_id)?;

        self.order_repo.remove_line(&cmd.line_id).await?;
        self.order_repo.update(&order).await?;

        info!("Line removed from order {}: {}", cmd.order_id.0, cmd.line_id.0);
        Ok(())
    }

    /// Delete an order with its lines. Refused once an invoice exists.
    pub async fn delete(&self, cmd: DeleteOrderCommand) -> AppResult<()> {
        let order = self.load(&cmd.order_id).await?;

        if self.invoice_repo.exists_for_order(&cmd.order_id).await? {
            warn!(
                "Refusing to delete order {}: already invoiced",
                cmd.order_id.0
            );
            return Err(AppError::constraint(format!(
                "order '{}' is already invoiced",
                order.title()
            )));
        }

        self.order_repo.delete(&cmd.order_id).await?;

        info!("Order deleted: {}", cmd.order_id.0);
        Ok(())
    }

    /// Get an order with its lines
    pub async fn get(&self, query: GetOrderQuery) -> AppResult<Order> {
        self.load(&query.order_id).await
    }

    /// List orders
    pub async fn list(&self, query: ListOrdersQuery) -> AppResult<PagedResult<Order>> {
        self.order_repo.list(query.filter, query.pagination).await
    }

    /// What the order would cost right now: lines plus labor at the
    /// configured rates, without any order discount.
    pub async fn totals(&self, query: GetOrderTotalsQuery) -> AppResult<TotalsBreakdown> {
        let order = self.load(&query.order_id).await?;
        let settings = load_pricing_settings(self.setting_repo.as_ref()).await?;

        let totals = OrderTotals::compute(
            &order.line_items(),
            order.labor_hours(),
            Decimal::ZERO,
            &settings,
        )?;
        Ok(totals.rounded())
    }

    async fn load(&self, order_id: &OrderId) -> AppResult<Order> {
        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("order {} does not exist", order_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Vehicle;
    use crate::domain::enums::OrderPriority;
    use crate::domain::repositories::{
        MockCustomerRepository, MockInvoiceRepository, MockOrderRepository, MockPartRepository,
        MockSettingRepository, MockVehicleRepository,
    };
    use crate::domain::value_objects::CustomerId;

    #[tokio::test]
    async fn test_create_rejects_foreign_vehicle() {
        let customer = crate::domain::entities::Customer::new("Anna", "Muster");
        let customer_id = customer.id().clone();

        // The vehicle belongs to someone else.
        let vehicle = Vehicle::new(CustomerId::new(), "VW", "Golf VII", "ZH 84 912");
        let vehicle_id = vehicle.id().clone();

        let mut customers = MockCustomerRepository::new();
        customers
            .expect_find_by_id()
            .returning(move |_| Ok(Some(customer.clone())));

        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_by_id()
            .returning(move |_| Ok(Some(vehicle.clone())));

        let mut orders = MockOrderRepository::new();
        orders.expect_save().never();

        let handler = OrderHandler::new(
            Arc::new(orders),
            Arc::new(customers),
            Arc::new(vehicles),
            Arc::new(MockPartRepository::new()),
            Arc::new(MockInvoiceRepository::new()),
            Arc::new(MockSettingRepository::new()),
        );

        let result = handler
            .create(CreateOrderCommand {
                customer_id,
                vehicle_id: Some(vehicle_id),
                title: "Brake service".to_string(),
                description: String::new(),
                priority: OrderPriority::Normal,
                labor_hours: Decimal::ZERO,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_refused_once_invoiced() {
        let order = Order::new(
            CustomerId::new(),
            None,
            "Brake service",
            "",
            OrderPriority::Normal,
        );
        let order_id = order.id().clone();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        orders.expect_delete().never();

        let mut invoices = MockInvoiceRepository::new();
        invoices.expect_exists_for_order().returning(|_| Ok(true));

        let handler = OrderHandler::new(
            Arc::new(orders),
            Arc::new(MockCustomerRepository::new()),
            Arc::new(MockVehicleRepository::new()),
            Arc::new(MockPartRepository::new()),
            Arc::new(invoices),
            Arc::new(MockSettingRepository::new()),
        );

        let result = handler.delete(DeleteOrderCommand { order_id }).await;
        assert!(matches!(result, Err(AppError::Constraint(_))));
    }
}
