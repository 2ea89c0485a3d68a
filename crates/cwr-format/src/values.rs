//! Placeholder values handed to a template.

use std::collections::BTreeMap;

/// A primitive value for one placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    /// Rendered as `Y` / `N`.
    Flag(bool),
}

impl FieldValue {
    /// Text form before normalization. Non-finite decimals render empty.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) if value.is_finite() => value.to_string(),
            Self::Decimal(_) => String::new(),
            Self::Flag(true) => "Y".to_string(),
            Self::Flag(false) => "N".to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Placeholder key -> value mapping for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: BTreeMap<&'static str, FieldValue>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<FieldValue>) -> &mut Self {
        self.values.insert(key, value.into());
        self
    }

    /// Set `key` only when `value` is present.
    pub fn set_opt<V: Into<FieldValue>>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.values.insert(key, value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Rendered text for `key`; missing keys render as the empty string.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(FieldValue::render).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<FieldValue>> FromIterator<(&'static str, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (&'static str, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        }
    }
}
