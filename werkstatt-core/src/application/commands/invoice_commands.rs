//! Invoice commands

use rust_decimal::Decimal;
use werkstatt_errors::AppResult;

use crate::domain::enums::PaymentMethod;
use crate::domain::value_objects::{InvoiceId, OrderId};

/// Create invoice command. Without an explicit discount the configured
/// default discount applies.
#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
    pub order_id: OrderId,
    pub discount_percent: Option<Decimal>,
    pub notes: String,
}

impl CreateInvoiceCommand {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(discount) = self.discount_percent {
            if discount.is_sign_negative() || discount > Decimal::ONE_HUNDRED {
                return Err(werkstatt_errors::AppError::validation(format!(
                    "discount must be between 0 and 100 percent, got {}",
                    discount
                )));
            }
        }
        Ok(())
    }
}

/// Mark paid command
#[derive(Debug, Clone)]
pub struct MarkInvoicePaidCommand {
    pub invoice_id: InvoiceId,
    pub payment_method: PaymentMethod,
}

/// Delete invoice command
#[derive(Debug, Clone)]
pub struct DeleteInvoiceCommand {
    pub invoice_id: InvoiceId,
}
