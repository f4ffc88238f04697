//! Phone number parsing and normalization
//!
//! A small oracle used by the wizard predicates and the verification flow.
//! Numbers are normalized to E.164 digits without the leading `+`; a bare
//! ten-digit number is assumed to be North American and gets the `1` prefix.

use std::fmt;

/// Fewest digits accepted as a phone number
pub const MIN_DIGITS: usize = 6;

/// Most digits allowed by E.164
pub const MAX_DIGITS: usize = 15;

/// A normalized phone number (digits only, country code included)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    digits: String,
}

impl PhoneNumber {
    /// Parse user input into a normalized phone number
    pub fn parse(input: &str) -> Result<Self, PhoneParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PhoneParseError::Empty);
        }

        for (idx, c) in trimmed.char_indices() {
            let allowed = c.is_ascii_digit()
                || matches!(c, ' ' | '-' | '.' | '(' | ')')
                || (c == '+' && idx == 0);
            if !allowed {
                return Err(PhoneParseError::InvalidCharacter(c));
            }
        }

        let digits = digits_only(trimmed);
        if digits.len() < MIN_DIGITS {
            return Err(PhoneParseError::TooShort(digits.len()));
        }
        if digits.len() > MAX_DIGITS {
            return Err(PhoneParseError::TooLong(digits.len()));
        }

        let international = trimmed.starts_with('+');
        let digits = if !international && digits.len() == 10 {
            format!("1{}", digits)
        } else {
            digits
        };

        Ok(Self { digits })
    }

    /// Whether the input would parse
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Normalized digits, as stored on the record
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Consume into the normalized digit string
    pub fn into_digits(self) -> String {
        self.digits
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.digits)
    }
}

/// Strip everything that is not an ASCII digit
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Compare a stored phone with user input
///
/// Matches when the digit-stripped strings are identical, or when both
/// normalize to the same number (so `(555) 123-4567` matches `15551234567`).
pub fn matches(stored: &str, input: &str) -> bool {
    let stored_digits = digits_only(stored);
    let input_digits = digits_only(input);
    if stored_digits.is_empty() || input_digits.is_empty() {
        return false;
    }
    if stored_digits == input_digits {
        return true;
    }
    match (PhoneNumber::parse(stored), PhoneNumber::parse(input)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Format stored digits for display (`+15551234567`)
pub fn display(stored: &str) -> String {
    let digits = digits_only(stored);
    if digits.is_empty() {
        String::new()
    } else {
        format!("+{}", digits)
    }
}

/// Why a phone number was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneParseError {
    Empty,
    InvalidCharacter(char),
    TooShort(usize),
    TooLong(usize),
}

impl fmt::Display for PhoneParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneParseError::Empty => write!(f, "phone number is empty"),
            PhoneParseError::InvalidCharacter(c) => {
                write!(f, "unexpected character '{}' in phone number", c)
            }
            PhoneParseError::TooShort(n) => {
                write!(f, "phone number has {} digits, need at least {}", n, MIN_DIGITS)
            }
            PhoneParseError::TooLong(n) => {
                write!(f, "phone number has {} digits, at most {} allowed", n, MAX_DIGITS)
            }
        }
    }
}

impl std::error::Error for PhoneParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_international() {
        let phone = PhoneNumber::parse("+44 20 7946 0958").unwrap();
        assert_eq!(phone.digits(), "442079460958");
        assert_eq!(phone.to_string(), "+442079460958");
    }

    #[test]
    fn test_parse_ten_digits_gets_country_code() {
        let phone = PhoneNumber::parse("(555) 123-4567").unwrap();
        assert_eq!(phone.digits(), "15551234567");
    }

    #[test]
    fn test_parse_eleven_digits_kept() {
        let phone = PhoneNumber::parse("1-555-123-4567").unwrap();
        assert_eq!(phone.digits(), "15551234567");
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneParseError::Empty));
        assert_eq!(PhoneNumber::parse("12345"), Err(PhoneParseError::TooShort(5)));
        assert_eq!(
            PhoneNumber::parse("5551234x"),
            Err(PhoneParseError::InvalidCharacter('x'))
        );
        assert_eq!(
            PhoneNumber::parse("555+1234567"),
            Err(PhoneParseError::InvalidCharacter('+'))
        );
        assert_eq!(
            PhoneNumber::parse("1234567890123456"),
            Err(PhoneParseError::TooLong(16))
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(PhoneNumber::is_valid("+254 712 345678"));
        assert!(!PhoneNumber::is_valid("call me"));
    }

    #[test]
    fn test_matches_digit_for_digit() {
        assert!(matches("254712345678", "+254 712 345 678"));
        assert!(!matches("254712345678", "+254 712 345 679"));
    }

    #[test]
    fn test_matches_after_normalization() {
        assert!(matches("15551234567", "(555) 123-4567"));
    }

    #[test]
    fn test_matches_empty_never() {
        assert!(!matches("", ""));
        assert!(!matches("15551234567", ""));
    }

    #[test]
    fn test_display() {
        assert_eq!(display("15551234567"), "+15551234567");
        assert_eq!(display(""), "");
    }
}
