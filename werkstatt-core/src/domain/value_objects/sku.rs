//! Part SKU value object

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum SKU length
const MAX_LENGTH: usize = 40;

/// SKU error
#[derive(Debug, Error)]
pub enum SkuError {
    #[error("SKU cannot be empty")]
    Empty,
    #[error("SKU cannot be longer than {MAX_LENGTH} characters")]
    TooLong,
    #[error("SKU contains an invalid character: {0}")]
    InvalidCharacter(char),
}

/// SKU value object
///
/// Business rules:
/// - not empty
/// - at most 40 characters
/// - letters, digits, hyphen and underscore only
///
/// Input is trimmed and uppercased, so `br-1234 ` and `BR-1234` are the
/// same article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku(String);

impl Sku {
    /// Create a new SKU.
    pub fn new(value: impl Into<String>) -> Result<Self, SkuError> {
        let value = value.into().trim().to_uppercase();

        if value.is_empty() {
            return Err(SkuError::Empty);
        }

        if value.len() > MAX_LENGTH {
            return Err(SkuError::TooLong);
        }

        for c in value.chars() {
            if !c.is_alphanumeric() && c != '-' && c != '_' {
                return Err(SkuError::InvalidCharacter(c));
            }
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Sku {
    type Error = SkuError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Sku {
    type Error = SkuError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sku() {
        let sku = Sku::new("BR-1234").unwrap();
        assert_eq!(sku.as_str(), "BR-1234");
    }

    #[test]
    fn test_trim_and_uppercase() {
        let sku = Sku::new("  br-1234 ").unwrap();
        assert_eq!(sku.as_str(), "BR-1234");
    }

    #[test]
    fn test_empty_sku() {
        let result = Sku::new("   ");
        assert!(matches!(result, Err(SkuError::Empty)));
    }

    #[test]
    fn test_too_long_sku() {
        let result = Sku::new("X".repeat(41));
        assert!(matches!(result, Err(SkuError::TooLong)));
    }

    #[test]
    fn test_invalid_character() {
        let result = Sku::new("BR 1234");
        assert!(matches!(result, Err(SkuError::InvalidCharacter(' '))));

        let result = Sku::new("BR#1234");
        assert!(matches!(result, Err(SkuError::InvalidCharacter('#'))));
    }
}
