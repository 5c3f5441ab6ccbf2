//! Enums

mod order_priority;
mod order_status;
mod payment_method;

pub use order_priority::OrderPriority;
pub use order_status::OrderStatus;
pub use payment_method::PaymentMethod;
