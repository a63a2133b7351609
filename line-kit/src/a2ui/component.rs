//! A2UI Component Kinds
//!
//! A component node on the wire is a single-key object: the key names the
//! kind and its value holds the kind-specific properties.
//!
//! ```text
//! {"Button": {"child": "btnText", "action": {"name": "book"}}}
//! ```
//!
//! Nodes are unwrapped into the closed [`Component`] enum. Kinds this crate
//! does not understand, and known kinds whose properties cannot be read, are
//! kept as [`Component::Unknown`] so the compiler can still render a visible
//! placeholder for them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::value::{BoundValue, Label};

/// Kind name used for nodes that carry no kind at all.
pub const UNKNOWN_KIND: &str = "Unknown";

/// Component kind identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    // Layout
    Column,
    Row,
    Card,
    Carousel,

    // Display
    Text,

    // Interactive
    Button,
    Confirm,

    // Native messages
    Location,
    Imagemap,
    Audio,
    Video,
}

impl ComponentKind {
    /// Get the A2UI component kind name
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Column => "Column",
            ComponentKind::Row => "Row",
            ComponentKind::Card => "Card",
            ComponentKind::Carousel => "Carousel",
            ComponentKind::Text => "Text",
            ComponentKind::Button => "Button",
            ComponentKind::Confirm => "Confirm",
            ComponentKind::Location => "Location",
            ComponentKind::Imagemap => "Imagemap",
            ComponentKind::Audio => "Audio",
            ComponentKind::Video => "Video",
        }
    }

    /// Parse from a kind name
    pub fn from_name(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == s)
    }

    /// Get all component kinds
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Column,
            ComponentKind::Row,
            ComponentKind::Card,
            ComponentKind::Carousel,
            ComponentKind::Text,
            ComponentKind::Button,
            ComponentKind::Confirm,
            ComponentKind::Location,
            ComponentKind::Imagemap,
            ComponentKind::Audio,
            ComponentKind::Video,
        ]
    }
}

/// A component node of a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Column(LayoutProps),
    Row(LayoutProps),
    Card(CardProps),
    Carousel(LayoutProps),
    Text(TextProps),
    Button(ButtonProps),
    Confirm(ConfirmProps),
    Location(LocationProps),
    Imagemap(ImagemapProps),
    Audio(AudioProps),
    Video(VideoProps),

    /// Unsupported kind, or a supported kind with unreadable properties
    Unknown { kind: String, props: Value },
}

impl Component {
    /// Unwrap a raw single-key node.
    ///
    /// A node with no keys (or that is not an object) becomes
    /// `Unknown` with empty properties.
    pub fn from_node(node: Value) -> Self {
        let entry = match node {
            Value::Object(map) => map.into_iter().next(),
            _ => None,
        };
        let Some((kind, props)) = entry else {
            return Component::Unknown {
                kind: UNKNOWN_KIND.to_string(),
                props: Value::Object(Map::new()),
            };
        };
        let props = match props {
            Value::Null => Value::Object(Map::new()),
            props => props,
        };

        let Some(known) = ComponentKind::from_name(&kind) else {
            return Component::Unknown { kind, props };
        };

        let parsed = match known {
            ComponentKind::Column => serde_json::from_value(props.clone()).map(Component::Column),
            ComponentKind::Row => serde_json::from_value(props.clone()).map(Component::Row),
            ComponentKind::Card => serde_json::from_value(props.clone()).map(Component::Card),
            ComponentKind::Carousel => {
                serde_json::from_value(props.clone()).map(Component::Carousel)
            }
            ComponentKind::Text => serde_json::from_value(props.clone()).map(Component::Text),
            ComponentKind::Button => serde_json::from_value(props.clone()).map(Component::Button),
            ComponentKind::Confirm => {
                serde_json::from_value(props.clone()).map(Component::Confirm)
            }
            ComponentKind::Location => {
                serde_json::from_value(props.clone()).map(Component::Location)
            }
            ComponentKind::Imagemap => {
                serde_json::from_value(props.clone()).map(Component::Imagemap)
            }
            ComponentKind::Audio => serde_json::from_value(props.clone()).map(Component::Audio),
            ComponentKind::Video => serde_json::from_value(props.clone()).map(Component::Video),
        };

        parsed.unwrap_or_else(|err| {
            ::log::warn!("[A2UI] Unreadable {kind} component properties: {err}");
            Component::Unknown { kind, props }
        })
    }

    /// The kind of this component, `None` for unknown ones
    pub fn kind(&self) -> Option<ComponentKind> {
        match self {
            Component::Column(_) => Some(ComponentKind::Column),
            Component::Row(_) => Some(ComponentKind::Row),
            Component::Card(_) => Some(ComponentKind::Card),
            Component::Carousel(_) => Some(ComponentKind::Carousel),
            Component::Text(_) => Some(ComponentKind::Text),
            Component::Button(_) => Some(ComponentKind::Button),
            Component::Confirm(_) => Some(ComponentKind::Confirm),
            Component::Location(_) => Some(ComponentKind::Location),
            Component::Imagemap(_) => Some(ComponentKind::Imagemap),
            Component::Audio(_) => Some(ComponentKind::Audio),
            Component::Video(_) => Some(ComponentKind::Video),
            Component::Unknown { .. } => None,
        }
    }

    /// The kind name as it appeared on the wire
    pub fn kind_name(&self) -> &str {
        match self {
            Component::Unknown { kind, .. } => kind,
            known => known.kind().map(|k| k.name()).unwrap_or(UNKNOWN_KIND),
        }
    }

    /// Create a text component with a literal string
    pub fn text(text: impl Into<String>) -> Self {
        Component::Text(TextProps {
            text: Some(BoundValue::literal(text)),
        })
    }

    /// Create a column over the given child ids
    pub fn column<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Component::Column(LayoutProps {
            children: Children::explicit(children),
        })
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Component::from_node(Value::deserialize(d)?))
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(1))?;
        match self {
            Component::Column(p) | Component::Row(p) | Component::Carousel(p) => {
                map.serialize_entry(self.kind_name(), p)?
            }
            Component::Card(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Text(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Button(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Confirm(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Location(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Imagemap(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Audio(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Video(p) => map.serialize_entry(self.kind_name(), p)?,
            Component::Unknown { kind, props } => map.serialize_entry(kind, props)?,
        }
        map.end()
    }
}

/// Children reference.
///
/// Only the explicit list form is understood; any other addressing mode
/// (such as templates) is an empty list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Children {
    pub explicit_list: Vec<String>,
}

impl Children {
    pub fn explicit<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Children {
            explicit_list: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Child component IDs, in order
    pub fn ids(&self) -> &[String] {
        &self.explicit_list
    }
}

impl<'de> Deserialize<'de> for Children {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let list = match Value::deserialize(d)? {
            Value::Object(mut map) => map.remove("explicitList"),
            _ => None,
        };
        let explicit_list = match list {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(id) => id,
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(Children { explicit_list })
    }
}

/// Action reference carried by buttons
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Column, Row and Carousel properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProps {
    #[serde(default)]
    pub children: Children,
}

/// Card container around a single child
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<String>,
}

/// Text display component
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<BoundValue>,
}

/// Clickable button; its label comes from a Text child
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRef>,
}

/// Two-choice confirmation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<BoundValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_button: Option<ConfirmButton>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_button: Option<ConfirmButton>,
}

/// Inline button object of a Confirm
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRef>,
}

/// Map pin. Coordinates are kept raw and coerced when compiled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<BoundValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<BoundValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,
}

/// Tappable image with flat action areas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Label>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<Label>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_size: Option<Value>,

    #[serde(default)]
    pub actions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Label>,

    /// Milliseconds; passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Label>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<Label>,
}
