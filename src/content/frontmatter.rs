//! Front-matter parsing

use anyhow::{anyhow, Result};
use serde_yaml::Value;

use super::attributes::{AttributeValue, Attributes};
use crate::helpers::parse_date_string;

/// Split a source file into its YAML front-matter and body
///
/// Returns `(None, content)` when the file has no front-matter block.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start();

    let Some(rest) = trimmed.strip_prefix("---") else {
        return (None, content);
    };
    let rest = rest.trim_start_matches(['\n', '\r']);

    if let Some(body) = rest.strip_prefix("---") {
        return (Some(""), body.trim_start_matches(['\n', '\r']));
    }

    let Some(end_pos) = rest.find("\n---") else {
        // No closing ---, treat as no front-matter
        return (None, content);
    };

    let yaml_content = &rest[..end_pos];
    let remaining = &rest[end_pos + 4..]; // Skip \n---
    let remaining = remaining.trim_start_matches(['\n', '\r']);

    // A leading --- may just be a markdown horizontal rule
    if !looks_like_yaml(yaml_content) {
        return (None, content);
    }

    (Some(yaml_content), remaining)
}

/// At least one line must have the `key: value` shape
fn looks_like_yaml(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse YAML front-matter into raw attributes
///
/// Scalars become text. Values of keys ending in `Date` (`pubDate`,
/// `modDate`) become dates when they parse. Sequences of scalars are joined
/// with ", ".
pub fn parse_attributes(yaml_content: &str) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    if yaml_content.trim().is_empty() {
        return Ok(attributes);
    }

    let value: Value = serde_yaml::from_str(yaml_content)
        .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(attributes),
        _ => return Err(anyhow!("Front-matter must be a mapping of key: value pairs")),
    };

    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            tracing::warn!("Skipping front-matter entry with non-scalar key");
            continue;
        };
        match to_attribute_value(&key, value) {
            Some(value) => attributes.insert(key, value),
            None => {
                tracing::debug!("Skipping empty or nested front-matter value for {}", key);
            }
        }
    }

    Ok(attributes)
}

fn to_attribute_value(key: &str, value: Value) -> Option<AttributeValue> {
    match value {
        Value::Tagged(tagged) => to_attribute_value(key, tagged.value),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
            Some(AttributeValue::Text(items.join(", ")))
        }
        Value::Mapping(_) | Value::Null => None,
        scalar => {
            let text = scalar_to_string(&scalar)?;
            if key.ends_with("Date") {
                if let Some(date) = parse_date_string(&text) {
                    return Some(AttributeValue::Date(date));
                }
                tracing::warn!("Could not parse {} value {:?} as a date", key, text);
            }
            Some(AttributeValue::Text(text))
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}
