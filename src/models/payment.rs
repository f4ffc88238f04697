//! Payment methods offered on the (mocked) payment wall

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the recipient chose to pay
///
/// The store column is free text, so values this client does not offer are
/// kept verbatim in `Other` instead of failing the whole row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,
    /// Mobile money wallet
    Mobile,
    /// Bank transfer
    Bank,
    /// Any other value found in the store
    Other(String),
}

impl PaymentMethod {
    /// All methods in the order the payment wall lists them
    pub const ALL: [PaymentMethod; 3] = [Self::Card, Self::Mobile, Self::Bank];

    /// Wire identifier (`card`, `mobile`, `bank`, or the stored value)
    pub fn id(&self) -> &str {
        match self {
            Self::Card => "card",
            Self::Mobile => "mobile",
            Self::Bank => "bank",
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Card => "Credit Card",
            Self::Mobile => "Mobile Money",
            Self::Bank => "Bank Transfer",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "card" => Self::Card,
            "mobile" => Self::Mobile,
            "bank" => Self::Bank,
            _ => Self::Other(raw),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(raw) => raw,
            known => known.id().to_string(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" | "credit" | "credit card" => Ok(Self::Card),
            "mobile" | "mobile money" => Ok(Self::Mobile),
            "bank" | "bank transfer" => Ok(Self::Bank),
            other => Err(format!(
                "unknown payment method '{}' (expected card, mobile or bank)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("Mobile Money".parse::<PaymentMethod>().unwrap(), PaymentMethod::Mobile);
        assert_eq!(" BANK ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Bank);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_ids() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Mobile).unwrap(), "\"mobile\"");
        for method in PaymentMethod::ALL {
            let json = format!("\"{}\"", method.id());
            assert_eq!(serde_json::from_str::<PaymentMethod>(&json).unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_stored_value_is_kept() {
        let method: PaymentMethod = serde_json::from_str("\"paypal\"").unwrap();
        assert_eq!(method, PaymentMethod::Other("paypal".into()));
        assert_eq!(method.display_name(), "paypal");
        assert_eq!(serde_json::to_string(&method).unwrap(), "\"paypal\"");

        // Only the offered methods can be chosen
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }
}
