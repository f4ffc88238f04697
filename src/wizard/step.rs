//! Step definitions and validation rules

use std::time::Duration;

use crate::models::{Money, PhoneNumber};

/// A declarative validation rule over a single field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Trimmed value has at least this many characters
    MinChars(usize),
    /// Value is a phone number the phone oracle accepts
    Phone,
    /// Value parses as money and is strictly positive
    PositiveAmount,
    /// Trimmed value is not empty
    NonEmpty,
}

impl Rule {
    /// Evaluate the rule. Pure and total.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::MinChars(n) => value.trim().chars().count() >= *n,
            Rule::Phone => PhoneNumber::is_valid(value),
            Rule::PositiveAmount => Money::parse(value).map_or(false, |m| m.is_positive()),
            Rule::NonEmpty => !value.trim().is_empty(),
        }
    }

    /// Short hint shown next to an invalid field
    pub fn hint(&self) -> String {
        match self {
            Rule::MinChars(n) => format!("at least {} characters", n),
            Rule::Phone => "a valid phone number".to_string(),
            Rule::PositiveAmount => "an amount greater than zero".to_string(),
            Rule::NonEmpty => "required".to_string(),
        }
    }
}

/// One step of a wizard
#[derive(Debug, Clone)]
pub struct StepDef {
    /// Key into the shared form data
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub rule: Rule,
    /// Debounce before auto-advancing past this step
    pub delay: Duration,
    /// Hide this step if it is the last one and stays empty past the idle timeout
    pub hide_when_idle: bool,
}

impl StepDef {
    pub fn new(key: &'static str, label: &'static str, rule: Rule, delay: Duration) -> Self {
        Self {
            key,
            label,
            placeholder: "",
            rule,
            delay,
            hide_when_idle: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn hide_when_idle(mut self, enabled: bool) -> Self {
        self.hide_when_idle = enabled;
        self
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.rule.check(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars_trims() {
        let rule = Rule::MinChars(2);
        assert!(rule.check("Al"));
        assert!(rule.check("  Al  "));
        assert!(!rule.check(" A "));
        assert!(!rule.check(""));
        assert!(rule.check("Zoë"));
    }

    #[test]
    fn test_phone_rule() {
        assert!(Rule::Phone.check("(555) 123-4567"));
        assert!(Rule::Phone.check("+44 20 7946 0958"));
        assert!(!Rule::Phone.check("555"));
        assert!(!Rule::Phone.check("call me"));
    }

    #[test]
    fn test_positive_amount_rule() {
        assert!(Rule::PositiveAmount.check("25.50"));
        assert!(Rule::PositiveAmount.check("$0.01"));
        assert!(!Rule::PositiveAmount.check("0"));
        assert!(!Rule::PositiveAmount.check("-5"));
        assert!(!Rule::PositiveAmount.check("abc"));
        assert!(!Rule::PositiveAmount.check(""));
    }

    #[test]
    fn test_non_empty_rule() {
        assert!(Rule::NonEmpty.check("Dinner"));
        assert!(!Rule::NonEmpty.check("   "));
    }
}
