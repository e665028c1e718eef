//! Raw post attributes and typed accessors for well-known keys

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;

use crate::helpers::parse_date_string;

/// A single attribute value as supplied by the source file parser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Date(DateTime<FixedOffset>),
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for AttributeValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        AttributeValue::Date(value)
    }
}

/// Key/value attributes extracted from a source file
///
/// Keys are unique. Insertion order is kept only so that debug output and
/// serialized attributes read the same way as the source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key
    pub fn insert<K: Into<String>, V: Into<AttributeValue>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with<K: Into<String>, V: Into<AttributeValue>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Text value for `key`; dates are not text
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            AttributeValue::Text(s) => Some(s.as_str()),
            AttributeValue::Date(_) => None,
        }
    }

    /// Text value for `key`, ignoring empty values
    pub fn non_empty_text(&self, key: &str) -> Option<&str> {
        self.text(key).filter(|s| !s.is_empty())
    }

    /// Date value for `key`, parsing text values when needed
    pub fn date(&self, key: &str) -> Option<DateTime<FixedOffset>> {
        match self.0.get(key)? {
            AttributeValue::Date(d) => Some(*d),
            AttributeValue::Text(s) => parse_date_string(s),
        }
    }

    /// Unsigned integer value for `key`, parsed from text
    pub fn unsigned(&self, key: &str) -> Option<u64> {
        let text = self.non_empty_text(key)?;
        match text.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!("Ignoring non-numeric value {:?} for attribute {}", text, key);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_date_accessors() {
        let date = parse_date_string("2024-03-07").unwrap();
        let attributes = Attributes::new()
            .with("title", "Hello")
            .with("pubDate", date)
            .with("modDate", "2024-03-08 10:00:00");

        assert_eq!(attributes.text("title"), Some("Hello"));
        assert_eq!(attributes.text("pubDate"), None);
        assert_eq!(attributes.date("pubDate"), Some(date));
        assert!(attributes.date("modDate").is_some());
        assert_eq!(attributes.date("title"), None);
        assert_eq!(attributes.text("missing"), None);
    }

    #[test]
    fn test_non_empty_text() {
        let attributes: Attributes = [("link", ""), ("blank", "  "), ("title", "x")]
            .into_iter()
            .collect();
        assert_eq!(attributes.text("link"), Some(""));
        assert_eq!(attributes.non_empty_text("link"), None);
        assert_eq!(attributes.non_empty_text("blank"), Some("  "));
        assert_eq!(attributes.non_empty_text("title"), Some("x"));
    }

    #[test]
    fn test_unsigned() {
        let attributes = Attributes::new()
            .with("length", " 1024 ")
            .with("duration", "about an hour");
        assert_eq!(attributes.unsigned("length"), Some(1024));
        assert_eq!(attributes.unsigned("duration"), None);
        assert_eq!(attributes.unsigned("missing"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut attributes = Attributes::new();
        attributes.insert("title", "first");
        attributes.insert("title", "second");
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.text("title"), Some("second"));
    }
}
