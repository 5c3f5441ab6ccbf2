//! Invoice handler

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use werkstatt_common::PagedResult;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::{setting_keys, Invoice};
use crate::domain::pricing::{LineItem, OrderTotals};
use crate::domain::repositories::{
    CustomerRepository, InvoiceRepository, OrderRepository, PartRepository, SettingRepository,
};
use crate::domain::value_objects::{InvoiceId, InvoiceNumber};

use crate::application::commands::*;
use crate::application::queries::*;

use super::{load_bank_details, load_company_profile, load_pricing_settings};

pub struct InvoiceHandler {
    invoice_repo: Arc<dyn InvoiceRepository>,
    order_repo: Arc<dyn OrderRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    part_repo: Arc<dyn PartRepository>,
    setting_repo: Arc<dyn SettingRepository>,
}

impl InvoiceHandler {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        order_repo: Arc<dyn OrderRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
        part_repo: Arc<dyn PartRepository>,
        setting_repo: Arc<dyn SettingRepository>,
    ) -> Self {
        Self {
            invoice_repo,
            order_repo,
            customer_repo,
            part_repo,
            setting_repo,
        }
    }

    /// Create the invoice for an order.
    ///
    /// Amounts and lines are frozen at this moment: part lines as priced
    /// on the order, labor as one line at the configured hourly rate.
    pub async fn create(&self, cmd: CreateInvoiceCommand) -> AppResult<InvoiceId> {
        info!("Creating invoice for order: {}", cmd.order_id.0);
        cmd.validate()?;

        // 1. The order with its lines
        let order = self
            .order_repo
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("order {} does not exist", cmd.order_id))
            })?;

        // 2. One invoice per order
        if self.invoice_repo.exists_for_order(&cmd.order_id).await? {
            warn!("Order {} is already invoiced", cmd.order_id.0);
            return Err(AppError::constraint(format!(
                "order '{}' is already invoiced",
                order.title()
            )));
        }

        // 3. Explicit discount, or the configured default
        let discount_percent = match cmd.discount_percent {
            Some(discount) => discount,
            None => self.default_discount_percent().await?,
        };

        // 4. Totals at the current rates
        let settings = load_pricing_settings(self.setting_repo.as_ref()).await?;
        let totals = OrderTotals::compute(
            &order.line_items(),
            order.labor_hours(),
            discount_percent,
            &settings,
        )?;
        let breakdown = totals.rounded();

        // 5. Number from the running counter
        let sequence = self.invoice_repo.count_all().await? + 1;
        let number = InvoiceNumber::new(Utc::now().year(), sequence as u32);

        // 6. Snapshot the lines, labor last
        let mut invoice = Invoice::new(cmd.order_id.clone(), number, &breakdown);
        invoice.set_notes(cmd.notes);
        for order_line in order.lines() {
            let sku = self
                .part_repo
                .find_by_id(order_line.part_id())
                .await?
                .map(|p| p.sku().clone());
            invoice.add_line(Some(order_line.part_id().clone()), sku, order_line.item());
        }
        if order.labor_hours() > Decimal::ZERO {
            let labor_item = LineItem::new(
                format!("Labor ({} h)", order.labor_hours()),
                1,
                totals.labor_cost(),
                Decimal::ZERO,
            )?;
            invoice.add_line(None, None, &labor_item);
        }

        self.invoice_repo.save(&invoice).await?;

        info!(
            "Invoice {} created for order {}, total {}",
            invoice.number(),
            cmd.order_id.0,
            invoice.grand_total()
        );
        Ok(invoice.id().clone())
    }

    /// Record the payment of an invoice
    pub async fn mark_paid(&self, cmd: MarkInvoicePaidCommand) -> AppResult<()> {
        let mut invoice = self.load(&cmd.invoice_id).await?;
        invoice.mark_paid(cmd.payment_method)?;

        self.invoice_repo.update(&invoice).await?;

        info!(
            "Invoice {} marked paid via {:?}",
            invoice.number(),
            cmd.payment_method
        );
        Ok(())
    }

    /// Delete an unpaid invoice
    pub async fn delete(&self, cmd: DeleteInvoiceCommand) -> AppResult<()> {
        let invoice = self.load(&cmd.invoice_id).await?;

        if invoice.is_paid() {
            warn!("Refusing to delete paid invoice {}", invoice.number());
            return Err(AppError::constraint(format!(
                "invoice {} is paid and cannot be deleted",
                invoice.number()
            )));
        }

        self.invoice_repo.delete(&cmd.invoice_id).await?;

        info!("Invoice deleted: {}", invoice.number());
        Ok(())
    }

    /// Get an invoice with its lines
    pub async fn get(&self, query: GetInvoiceQuery) -> AppResult<Invoice> {
        self.load(&query.invoice_id).await
    }

    /// List invoices
    pub async fn list(&self, query: ListInvoicesQuery) -> AppResult<PagedResult<Invoice>> {
        self.invoice_repo.list(query.filter, query.pagination).await
    }

    /// Assemble the print-ready document. The recipient block is empty
    /// when the customer was deleted after invoicing.
    pub async fn document(&self, query: GetInvoiceDocumentQuery) -> AppResult<InvoiceDocument> {
        let invoice = self.load(&query.invoice_id).await?;

        let company = load_company_profile(self.setting_repo.as_ref()).await?;
        let bank = load_bank_details(self.setting_repo.as_ref()).await?;

        let customer = match self.order_repo.find_by_id(invoice.order_id()).await? {
            Some(order) => self.customer_repo.find_by_id(order.customer_id()).await?,
            None => None,
        };
        let customer_block = match customer {
            Some(customer) => CustomerBlock {
                name: customer.display_name(),
                street: customer.street().to_string(),
                city_line: format!("{} {}", customer.postal_code(), customer.city())
                    .trim()
                    .to_string(),
            },
            None => {
                warn!("Customer of invoice {} no longer exists", invoice.number());
                CustomerBlock::default()
            }
        };

        let lines = invoice
            .lines()
            .iter()
            .map(|line| DocumentLine {
                position: line.position(),
                description: line.description().to_string(),
                quantity: line.quantity(),
                unit_price: line.unit_price().rounded(),
                discount_percent: line.discount_percent(),
                line_total: line.line_total(),
            })
            .collect();

        Ok(InvoiceDocument {
            number: invoice.number().as_str().to_string(),
            issue_date: invoice.issue_date(),
            company,
            bank,
            customer: customer_block,
            lines,
            subtotal: invoice.subtotal(),
            discount_percent: invoice.discount_percent(),
            discount_amount: invoice.discount_amount(),
            net: invoice.net(),
            tax_rate_percent: invoice.tax_rate_percent(),
            tax_amount: invoice.tax_amount(),
            grand_total: invoice.grand_total(),
            paid: invoice.is_paid(),
            notes: invoice.notes().to_string(),
        })
    }

    async fn load(&self, invoice_id: &InvoiceId) -> AppResult<Invoice> {
        self.invoice_repo
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("invoice {} does not exist", invoice_id))
            })
    }

    /// `default_discount_percent` setting, 0 when unset.
    async fn default_discount_percent(&self) -> AppResult<Decimal> {
        let Some(setting) = self
            .setting_repo
            .get(setting_keys::DEFAULT_DISCOUNT_PERCENT)
            .await?
        else {
            return Ok(Decimal::ZERO);
        };

        let discount: Decimal = setting.value.trim().parse().map_err(|_| {
            AppError::configuration(format!(
                "setting '{}' is not a number: '{}'",
                setting_keys::DEFAULT_DISCOUNT_PERCENT,
                setting.value
            ))
        })?;
        if discount.is_sign_negative() || discount > Decimal::ONE_HUNDRED {
            return Err(AppError::configuration(format!(
                "setting '{}' must be between 0 and 100, got {}",
                setting_keys::DEFAULT_DISCOUNT_PERCENT,
                discount
            )));
        }
        Ok(discount)
    }
}
