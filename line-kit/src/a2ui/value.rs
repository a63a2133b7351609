//! A2UI Value Types
//!
//! Represents the bound values used in the A2UI protocol for data binding,
//! and their resolution against a surface's data model.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::data_model::DataModel;

/// A value that is either a literal or a data-bound path.
///
/// Shapes that match none of the known forms are kept as [`BoundValue::Other`]
/// so that deserializing a component never fails on a bad binding; they
/// resolve to null.
///
/// # Examples
///
/// ```json
/// {"literalString": "Hello World"}
/// {"literalNumber": 42}
/// {"literalBoolean": true}
/// {"path": "/user/name"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// A literal string value
    Literal {
        #[serde(rename = "literalString")]
        literal_string: String,
    },
    /// A literal number value
    Number {
        #[serde(rename = "literalNumber")]
        literal_number: Number,
    },
    /// A literal boolean value
    Boolean {
        #[serde(rename = "literalBoolean")]
        literal_boolean: bool,
    },
    /// A path reference to the data model
    Path { path: String },
    /// Anything else
    Other(Value),
}

impl BoundValue {
    /// Create a new literal string value
    pub fn literal(s: impl Into<String>) -> Self {
        BoundValue::Literal {
            literal_string: s.into(),
        }
    }

    /// Create a new path reference
    pub fn path(p: impl Into<String>) -> Self {
        BoundValue::Path { path: p.into() }
    }

    /// Read a bound value out of an arbitrary JSON value.
    pub fn from_json(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| BoundValue::Other(value.clone()))
    }

    /// Check if this is a path reference
    pub fn is_path(&self) -> bool {
        matches!(self, BoundValue::Path { .. })
    }

    /// Get the path if this is a path reference
    pub fn as_path(&self) -> Option<&str> {
        match self {
            BoundValue::Path { path } => Some(path),
            _ => None,
        }
    }

    /// Resolve against the data model. Unresolvable values yield `Value::Null`.
    pub fn resolve(&self, data_model: &DataModel) -> Value {
        match self {
            BoundValue::Literal { literal_string } => Value::String(literal_string.clone()),
            BoundValue::Number { literal_number } => Value::Number(literal_number.clone()),
            BoundValue::Boolean { literal_boolean } => Value::Bool(*literal_boolean),
            BoundValue::Path { path } => data_model.get(path).cloned().unwrap_or(Value::Null),
            BoundValue::Other(_) => Value::Null,
        }
    }

    /// Resolve and render as display text; `None` when null or empty.
    pub fn resolve_string(&self, data_model: &DataModel) -> Option<String> {
        display_string(&self.resolve(data_model))
    }
}

/// Resolve an optional bound value; absence resolves to null.
pub fn resolve_value(value: Option<&BoundValue>, data_model: &DataModel) -> Value {
    value
        .map(|v| v.resolve(data_model))
        .unwrap_or(Value::Null)
}

/// Resolve an optional bound value to display text.
pub fn resolve_string(value: Option<&BoundValue>, data_model: &DataModel) -> Option<String> {
    display_string(&resolve_value(value, data_model))
}

/// A text property that accepts either a plain string or a bound value.
///
/// Used by inline property objects (confirm buttons, media urls) where
/// agents write `"label": "Yes"` as often as `{"literalString": "Yes"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Plain(String),
    Bound(BoundValue),
}

impl Label {
    pub fn resolve(&self, data_model: &DataModel) -> Value {
        match self {
            Label::Plain(s) => Value::String(s.clone()),
            Label::Bound(bound) => bound.resolve(data_model),
        }
    }

    pub fn resolve_string(&self, data_model: &DataModel) -> Option<String> {
        display_string(&self.resolve(data_model))
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Plain(s.to_string())
    }
}

/// Render a resolved value as text.
///
/// Null and the empty string yield `None` so callers can apply their default;
/// numbers and booleans use their JSON spelling.
pub fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
