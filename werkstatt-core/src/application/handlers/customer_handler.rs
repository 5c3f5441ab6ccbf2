//! Customer handler

use std::sync::Arc;

use tracing::{info, warn};
use werkstatt_common::PagedResult;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::Customer;
use crate::domain::repositories::{CustomerRepository, OrderRepository};
use crate::domain::value_objects::CustomerId;

use crate::application::commands::*;
use crate::application::queries::*;

pub struct CustomerHandler {
    customer_repo: Arc<dyn CustomerRepository>,
    order_repo: Arc<dyn OrderRepository>,
}

impl CustomerHandler {
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        order_repo: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            customer_repo,
            order_repo,
        }
    }

    /// Create a customer
    pub async fn create(&self, cmd: CreateCustomerCommand) -> AppResult<CustomerId> {
        cmd.validate()?;

        let mut customer = Customer::new(cmd.first_name, cmd.last_name)
            .with_contact(cmd.phone, cmd.email)
            .with_address(cmd.street, cmd.postal_code, cmd.city)
            .with_notes(cmd.notes);
        if let Some(company) = cmd.company.filter(|c| !c.trim().is_empty()) {
            customer = customer.with_company(company);
        }

        self.customer_repo.save(&customer).await?;

        info!("Customer created: {}", customer.id().0);
        Ok(customer.id().clone())
    }

    /// Update a customer
    pub async fn update(&self, cmd: UpdateCustomerCommand) -> AppResult<()> {
        cmd.validate()?;

        let mut customer = self
            .customer_repo
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("customer {} does not exist", cmd.customer_id))
            })?;

        customer.update_name(cmd.first_name, cmd.last_name);
        customer.update_company(cmd.company.filter(|c| !c.trim().is_empty()));
        customer.update_contact(cmd.phone, cmd.email);
        customer.update_address(cmd.street, cmd.postal_code, cmd.city);
        customer.update_notes(cmd.notes);

        self.customer_repo.update(&customer).await?;

        info!("Customer updated: {}", cmd.customer_id.0);
        Ok(())
    }

    /// Delete a customer together with their vehicles. Completed orders
    /// and invoices stay behind as history; open orders block the delete.
    pub async fn delete(&self, cmd: DeleteCustomerCommand) -> AppResult<()> {
        let customer = self
            .customer_repo
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("customer {} does not exist", cmd.customer_id))
            })?;

        let open_orders = self
            .order_repo
            .count_open_for_customer(&cmd.customer_id)
            .await?;
        if open_orders > 0 {
            warn!(
                "Refusing to delete customer {}: {} open order(s)",
                cmd.customer_id.0, open_orders
            );
            return Err(AppError::constraint(format!(
                "customer '{}' still has {} open order(s)",
                customer.display_name(),
                open_orders
            )));
        }

        self.customer_repo
            .delete_with_vehicles(&cmd.customer_id)
            .await?;

        info!("Customer deleted: {}", cmd.customer_id.0);
        Ok(())
    }

    /// Get a customer
    pub async fn get(&self, query: GetCustomerQuery) -> AppResult<Customer> {
        self.customer_repo
            .find_by_id(&query.customer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("customer {} does not exist", query.customer_id))
            })
    }

    /// List customers
    pub async fn list(&self, query: ListCustomersQuery) -> AppResult<PagedResult<Customer>> {
        self.customer_repo
            .list(query.filter, query.pagination)
            .await
    }
}
