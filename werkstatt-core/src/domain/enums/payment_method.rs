//! Payment method enum

use serde::{Deserialize, Serialize};

/// How a paid invoice was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Twint,
}

impl PaymentMethod {
    /// Storage code.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Twint => "TWINT",
        }
    }

    /// Decode a storage code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CASH" => Some(PaymentMethod::Cash),
            "CARD" => Some(PaymentMethod::Card),
            "BANK_TRANSFER" => Some(PaymentMethod::BankTransfer),
            "TWINT" => Some(PaymentMethod::Twint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::BankTransfer,
            PaymentMethod::Twint,
        ] {
            assert_eq!(PaymentMethod::from_code(method.code()), Some(method));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(PaymentMethod::from_code("CHEQUE"), None);
        assert_eq!(PaymentMethod::from_code(""), None);
    }
}
