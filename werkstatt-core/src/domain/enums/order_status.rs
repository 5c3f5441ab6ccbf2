//! Order status enum

use serde::{Deserialize, Serialize};

/// Work order status
///
/// Transitions are deliberately permissive: the operator may move an order
/// from any status to any other. The only bookkeeping tied to status is the
/// completion timestamp, maintained by the order entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Accepted, work not started
    #[default]
    Open,
    /// Being worked on
    InProgress,
    /// Blocked until parts arrive
    WaitingForParts,
    /// Work finished
    Completed,
}

impl OrderStatus {
    /// Storage code.
    pub fn code(&self) -> i64 {
        match self {
            OrderStatus::Open => 1,
            OrderStatus::InProgress => 2,
            OrderStatus::WaitingForParts => 3,
            OrderStatus::Completed => 4,
        }
    }

    /// Decode a storage code. `None` for unknown codes so the persistence
    /// layer can report the corrupt value instead of guessing.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(OrderStatus::Open),
            2 => Some(OrderStatus::InProgress),
            3 => Some(OrderStatus::WaitingForParts),
            4 => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

impl From<OrderStatus> for i64 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for status in [
            OrderStatus::Open,
            OrderStatus::InProgress,
            OrderStatus::WaitingForParts,
            OrderStatus::Completed,
        ] {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(OrderStatus::from_code(0), None);
        assert_eq!(OrderStatus::from_code(99), None);
    }
}
