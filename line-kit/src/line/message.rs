//! LINE Messaging API payload types
//!
//! Only the message shapes the compiler produces are modelled. Every type
//! serializes to the exact JSON the Messaging API expects, with no envelope.
//! Flex components and actions are self-tagged structs (`"type"` is written
//! from the struct itself) so they carry their tag wherever they are nested.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One outbound LINE message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum LineMessage {
    Text {
        text: String,
    },
    Flex {
        alt_text: String,
        contents: FlexContainer,
    },
    Template {
        alt_text: String,
        template: ConfirmTemplate,
    },
    Location {
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
    Imagemap {
        base_url: String,
        alt_text: String,
        base_size: ImagemapSize,
        actions: Vec<ImagemapAction>,
    },
    Audio {
        original_content_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration: Option<Value>,
    },
    Video {
        original_content_url: String,
        preview_image_url: String,
    },
}

impl LineMessage {
    /// Plain text message
    pub fn text(text: impl Into<String>) -> Self {
        LineMessage::Text { text: text.into() }
    }

    /// The message `type` as LINE spells it
    pub fn type_name(&self) -> &'static str {
        match self {
            LineMessage::Text { .. } => "text",
            LineMessage::Flex { .. } => "flex",
            LineMessage::Template { .. } => "template",
            LineMessage::Location { .. } => "location",
            LineMessage::Imagemap { .. } => "imagemap",
            LineMessage::Audio { .. } => "audio",
            LineMessage::Video { .. } => "video",
        }
    }
}

// ============================================================================
// Flex
// ============================================================================

/// Top-level contents of a flex message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexContainer {
    Bubble(Bubble),
    Carousel(Carousel),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "bubble")]
pub struct Bubble {
    pub body: FlexBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "carousel")]
pub struct Carousel {
    pub contents: Vec<Bubble>,
}

/// Any flex component that can sit inside a box
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexComponent {
    Box(FlexBox),
    Text(FlexText),
    Button(FlexButton),
    Separator(FlexSeparator),
}

impl From<FlexBox> for FlexComponent {
    fn from(b: FlexBox) -> Self {
        FlexComponent::Box(b)
    }
}

impl From<FlexText> for FlexComponent {
    fn from(t: FlexText) -> Self {
        FlexComponent::Text(t)
    }
}

impl From<FlexButton> for FlexComponent {
    fn from(b: FlexButton) -> Self {
        FlexComponent::Button(b)
    }
}

impl From<FlexSeparator> for FlexComponent {
    fn from(s: FlexSeparator) -> Self {
        FlexComponent::Separator(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxLayout {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "box", rename_all = "camelCase")]
pub struct FlexBox {
    pub layout: BoxLayout,
    pub contents: Vec<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_all: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<String>,
}

impl FlexBox {
    pub fn new(layout: BoxLayout, contents: Vec<FlexComponent>) -> Self {
        FlexBox {
            layout,
            contents,
            margin: None,
            spacing: None,
            padding_all: None,
            border_width: None,
            border_color: None,
            corner_radius: None,
        }
    }

    pub fn vertical(contents: Vec<FlexComponent>) -> Self {
        Self::new(BoxLayout::Vertical, contents)
    }

    pub fn horizontal(contents: Vec<FlexComponent>) -> Self {
        Self::new(BoxLayout::Horizontal, contents)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "text", rename_all = "camelCase")]
pub struct FlexText {
    pub text: String,
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl FlexText {
    /// Text with wrapping enabled and no styling
    pub fn wrapped(text: impl Into<String>) -> Self {
        FlexText {
            text: text.into(),
            wrap: true,
            weight: None,
            align: None,
            margin: None,
            color: None,
            size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "button")]
pub struct FlexButton {
    pub style: ButtonStyle,
    pub action: MessageAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "separator")]
pub struct FlexSeparator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
}

/// Action that makes the user send `text` when tapped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "message")]
pub struct MessageAction {
    pub label: String,
    pub text: String,
}

// ============================================================================
// Template
// ============================================================================

/// Confirm template: a prompt and exactly two actions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "confirm")]
pub struct ConfirmTemplate {
    pub text: String,
    pub actions: [MessageAction; 2],
}

// ============================================================================
// Imagemap
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImagemapSize {
    pub width: u64,
    pub height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImagemapArea {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ImagemapAction {
    Uri {
        link_uri: String,
        area: ImagemapArea,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Message {
        text: String,
        area: ImagemapArea,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Clipboard {
        clipboard_text: String,
        area: ImagemapArea,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}
