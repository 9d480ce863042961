//! Query capability over parsed bulletin records.
//!
//! The converter never parses documents itself. It walks them through
//! [`RecordNode`], which answers slash-separated path queries relative to a
//! node and exposes text and attributes. [`JsonNode`] implements the
//! capability over a `serde_json::Value` tree laid out like the XML it came
//! from:
//!
//! - child elements are object members; repeated elements are arrays
//! - attributes are members prefixed with `@` (e.g. `"@stationCode"`)
//! - text is a scalar member value, or the `#text` member of an element
//!   that also carries attributes

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Typed values that can be read from element text.
pub trait NodeValue: Sized {
    /// Parses trimmed, non-empty element text.
    fn from_text(text: &str) -> Option<Self>;
}

impl NodeValue for String {
    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl NodeValue for f64 {
    fn from_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl NodeValue for i64 {
    fn from_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl NodeValue for DateTime<Utc> {
    fn from_text(text: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

/// A node of a parsed record that answers path queries.
pub trait RecordNode: Sized {
    /// Elements matching a slash-separated path below this node, in document order.
    fn select(&self, path: &str) -> Vec<Self>;

    /// Text content of this element, if any.
    fn text(&self) -> Option<String>;

    /// Attribute of this element, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// True when this element has child elements.
    fn has_children(&self) -> bool;

    /// First element matching `path`.
    fn first(&self, path: &str) -> Option<Self> {
        self.select(path).into_iter().next()
    }

    /// Typed text of the first element matching `path`.
    ///
    /// Empty or whitespace-only text reads as absent, as does text that does
    /// not parse as `T`.
    fn read<T: NodeValue>(&self, path: &str) -> Option<T> {
        let text = self.first(path)?.text()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        T::from_text(trimmed)
    }
}

/// [`RecordNode`] over a borrowed JSON tree.
#[derive(Debug, Clone, Copy)]
pub struct JsonNode<'a> {
    value: &'a Value,
}

impl<'a> JsonNode<'a> {
    /// Wraps the root (or any element) of a JSON record.
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn children(value: &'a Value, name: &str) -> Vec<&'a Value> {
        match value.get(name) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(child) => vec![child],
            None => Vec::new(),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl<'a> RecordNode for JsonNode<'a> {
    fn select(&self, path: &str) -> Vec<Self> {
        let mut current = vec![self.value];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|value| Self::children(value, segment))
                .collect();
        }
        current.into_iter().map(JsonNode::new).collect()
    }

    fn text(&self) -> Option<String> {
        match self.value {
            Value::Object(map) => map.get("#text").and_then(scalar_text),
            other => scalar_text(other),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value
            .get(format!("@{}", name))
            .and_then(scalar_text)
    }

    fn has_children(&self) -> bool {
        match self.value {
            Value::Object(map) => map
                .keys()
                .any(|key| !key.starts_with('@') && !key.starts_with('#')),
            _ => false,
        }
    }
}
