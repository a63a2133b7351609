//! A2UI Protocol Message Types
//!
//! This module defines the Rust types for the A2UI protocol messages that
//! drive a surface. Messages are serialized/deserialized using serde_json.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::component::Component;

/// Lenient number deserializer: accepts numbers, ignores other types.
fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Number>, D::Error> {
    let val = Option::<Value>::deserialize(d)?.and_then(|v| match v {
        Value::Number(n) => Some(n),
        _ => None,
    });
    Ok(val)
}

/// Lenient bool deserializer: accepts booleans, ignores other types.
fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let val = Option::<Value>::deserialize(d)?.and_then(|v| v.as_bool());
    Ok(val)
}

/// Lenient string deserializer: accepts strings, ignores other types.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let val = Option::<Value>::deserialize(d)?.and_then(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    });
    Ok(val)
}

/// Lenient map deserializer: a non-array is no map, and unreadable
/// entries in an array are skipped.
fn lenient_map<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<DataEntry>>, D::Error> {
    let val = Option::<Value>::deserialize(d)?.and_then(|v| match v {
        Value::Array(items) => Some(lenient_entries(items)),
        _ => None,
    });
    Ok(val)
}

/// Null-tolerant list deserializer: `null` reads as an empty list.
fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// Null-tolerant entry list; entries that cannot be read at all (such as a
/// bare string or a missing key) are skipped.
fn lenient_contents<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<DataEntry>, D::Error> {
    let items = match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "contents must be a list, got {other}"
            )));
        }
    };
    Ok(lenient_entries(items))
}

fn lenient_entries(items: Vec<Value>) -> Vec<DataEntry> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<DataEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                ::log::warn!("[A2UI] Skipping unreadable data entry: {e}");
                None
            }
        })
        .collect()
}

/// Top-level A2UI message enum.
///
/// Each variant corresponds to one of the A2UI protocol message types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum A2uiMessage {
    /// Add or update components in the tree
    SurfaceUpdate(SurfaceUpdate),

    /// Update the data model
    DataModelUpdate(DataModelUpdate),

    /// Declare the root component of a surface
    BeginRendering(BeginRendering),

    /// Delete a surface
    DeleteSurface(DeleteSurface),
}

impl A2uiMessage {
    /// Get the surface ID this message applies to
    pub fn surface_id(&self) -> &str {
        match self {
            A2uiMessage::SurfaceUpdate(m) => &m.surface_id,
            A2uiMessage::DataModelUpdate(m) => &m.surface_id,
            A2uiMessage::BeginRendering(m) => &m.surface_id,
            A2uiMessage::DeleteSurface(m) => &m.surface_id,
        }
    }
}

/// Add or update components in the surface.
///
/// # Example JSON
///
/// ```text
/// {
///   "surfaceUpdate": {
///     "surfaceId": "main",
///     "components": [
///       {
///         "id": "root",
///         "component": {
///           "Column": {
///             "children": {"explicitList": ["header", "content"]}
///           }
///         }
///       }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    /// Target surface ID
    pub surface_id: String,

    /// Components to add or update
    #[serde(default, deserialize_with = "null_as_empty")]
    pub components: Vec<ComponentDefinition>,
}

/// A single component definition in the adjacency list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Unique component ID
    pub id: String,

    /// The component kind and properties
    pub component: Component,
}

/// Update the data model.
///
/// # Example JSON
///
/// ```text
/// {
///   "dataModelUpdate": {
///     "surfaceId": "main",
///     "path": "/booking",
///     "contents": [
///       {"key": "guests", "valueNumber": 2},
///       {"key": "contact", "valueMap": [{"key": "name", "valueString": "Aki"}]}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    /// Target surface ID
    pub surface_id: String,

    /// Base path for updates; absent, empty or `/` replaces the whole model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Data updates
    #[serde(default, deserialize_with = "lenient_contents")]
    pub contents: Vec<DataEntry>,
}

/// A single data content item.
///
/// An entry should carry exactly one value field. When several are present
/// the first of string, number, boolean, map wins; when none is, the entry
/// decodes to null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntry {
    /// Key name
    pub key: String,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_string: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_number: Option<Number>,

    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_boolean: Option<bool>,

    /// Nested map (object)
    #[serde(
        default,
        deserialize_with = "lenient_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_map: Option<Vec<DataEntry>>,
}

impl DataEntry {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        DataEntry {
            key: key.into(),
            value_string: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn number(key: impl Into<String>, value: impl Into<Number>) -> Self {
        DataEntry {
            key: key.into(),
            value_number: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        DataEntry {
            key: key.into(),
            value_boolean: Some(value),
            ..Default::default()
        }
    }

    pub fn map(key: impl Into<String>, entries: Vec<DataEntry>) -> Self {
        DataEntry {
            key: key.into(),
            value_map: Some(entries),
            ..Default::default()
        }
    }

    /// Convert the entry's value to a JSON value
    pub fn decode(&self) -> Value {
        if let Some(s) = &self.value_string {
            Value::String(s.clone())
        } else if let Some(n) = &self.value_number {
            Value::Number(n.clone())
        } else if let Some(b) = self.value_boolean {
            Value::Bool(b)
        } else if let Some(entries) = &self.value_map {
            Value::Object(Self::build_object(entries))
        } else {
            Value::Null
        }
    }

    /// Flatten a list of entries into an object; later keys win.
    pub fn build_object(entries: &[DataEntry]) -> Map<String, Value> {
        let mut map = Map::new();
        for entry in entries {
            map.insert(entry.key.clone(), entry.decode());
        }
        map
    }
}

/// Declare the entry point of a surface.
///
/// # Example JSON
///
/// ```text
/// {"beginRendering": {"surfaceId": "main", "root": "root-column"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    /// Surface identifier
    pub surface_id: String,

    /// ID of the root component
    pub root: String,
}

/// Delete a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurface {
    /// Surface ID to delete
    pub surface_id: String,
}
