//! Shared form data, one string per field key

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, empty if it was never set
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Whether a field is empty after trimming
    pub fn is_blank(&self, key: &str) -> bool {
        self.get(key).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_empty() {
        let mut form = FormData::new();
        assert_eq!(form.get("sender"), "");
        assert!(form.is_blank("sender"));

        form.set("sender", "  ");
        assert!(form.is_blank("sender"));

        form.set("sender", "Al");
        assert_eq!(form.get("sender"), "Al");
        assert_eq!(form.iter().count(), 1);
    }
}
