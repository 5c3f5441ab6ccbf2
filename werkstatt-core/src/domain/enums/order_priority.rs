//! Order priority enum

use serde::{Deserialize, Serialize};

/// Work order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl OrderPriority {
    /// Storage code.
    pub fn code(&self) -> i64 {
        match self {
            OrderPriority::Low => 1,
            OrderPriority::Normal => 2,
            OrderPriority::High => 3,
            OrderPriority::Urgent => 4,
        }
    }

    /// Decode a storage code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(OrderPriority::Low),
            2 => Some(OrderPriority::Normal),
            3 => Some(OrderPriority::High),
            4 => Some(OrderPriority::Urgent),
            _ => None,
        }
    }
}

impl From<OrderPriority> for i64 {
    fn from(priority: OrderPriority) -> Self {
        priority.code()
    }
}
