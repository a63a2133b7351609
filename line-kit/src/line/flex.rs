//! A2UI → LINE compiler
//!
//! Turns the current state of a [`Surface`] into a single [`LineMessage`].
//!
//! # Architecture
//!
//! ```text
//!            compile_surface
//!                  │
//!     ┌────────────┼──────────────────────────┐
//!     │            │                          │
//! Carousel     Confirm / Location /       any other root
//!     │        Imagemap / Audio / Video       │
//!     │        (native messages)              │
//!     └──────► layout ◄──────────────────────┘
//!                │  ▲
//!                ▼  │
//!               element
//! ```
//!
//! `layout` always yields a box; `element` yields whatever flex component
//! the kind maps to. The two recurse into each other through child ids.
//! Nothing here fails: missing children are skipped, unsupported or broken
//! components become a visible placeholder text.

use serde_json::{Map, Value};

use crate::a2ui::{
    AudioProps, BoundValue, ButtonProps, CardProps, Children, Component, ConfirmButton,
    ConfirmProps, DataModel, ImagemapProps, Label, LocationProps, Surface, VideoProps,
    display_string, resolve_string,
};

use super::message::*;

/// LINE rejects confirm template texts longer than this.
pub const CONFIRM_TEXT_MAX_CHARS: usize = 240;

/// Deepest component chain expanded before giving up on a subtree.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Side length LINE uses for imagemap base images.
pub const IMAGEMAP_BASE_WIDTH: u64 = 1040;

pub const MISSING_ROOT_TEXT: &str = "Missing beginRendering/root";
pub const ROOT_NOT_FOUND_TEXT: &str = "Root component not found";
pub const NO_SURFACE_TEXT: &str = "No surface";

const DEFAULT_ACTION_NAME: &str = "action";
const DEFAULT_BUTTON_LABEL: &str = "Submit";
const DEFAULT_CONFIRM_TEXT: &str = "Are you sure?";
const DEFAULT_LOCATION_TITLE: &str = "Location";

/// Options for a compile call
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// `altText` of flex, template and imagemap messages
    pub alt_text: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            alt_text: "A2UI".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn with_alt_text(alt_text: impl Into<String>) -> Self {
        CompileOptions {
            alt_text: alt_text.into(),
        }
    }
}

/// Compile a surface into one LINE message.
///
/// A missing or dangling root yields a diagnostic text message.
pub fn compile_surface(surface: &Surface, options: &CompileOptions) -> LineMessage {
    let Some(root_id) = surface.root.as_deref() else {
        return LineMessage::text(MISSING_ROOT_TEXT);
    };
    let Some(root) = surface.get_component(root_id) else {
        ::log::debug!("[LINE] Surface {} root {root_id} not found", surface.id);
        return LineMessage::text(ROOT_NOT_FOUND_TEXT);
    };

    let data_model = &surface.data_model;
    match root {
        Component::Carousel(props) => {
            let mut compiler = FlexCompiler::new(surface);
            LineMessage::Flex {
                alt_text: options.alt_text.clone(),
                contents: FlexContainer::Carousel(compiler.carousel(root_id, &props.children)),
            }
        }
        Component::Confirm(props) => confirm_template(props, data_model, options),
        Component::Location(props) => location(props, data_model),
        Component::Imagemap(props) => imagemap(props, data_model, options),
        Component::Audio(props) => audio(props, data_model),
        Component::Video(props) => video(props, data_model),
        other => {
            let body = FlexCompiler::new(surface).layout(root_id, other);
            LineMessage::Flex {
                alt_text: options.alt_text.clone(),
                contents: FlexContainer::Bubble(Bubble { body }),
            }
        }
    }
}

/// Recursive flex compilation over one surface.
///
/// `chain` holds the ids currently being expanded, root first.
struct FlexCompiler<'a> {
    surface: &'a Surface,
    chain: Vec<&'a str>,
}

impl<'a> FlexCompiler<'a> {
    fn new(surface: &'a Surface) -> Self {
        FlexCompiler {
            surface,
            chain: Vec::new(),
        }
    }

    fn data_model(&self) -> &'a DataModel {
        &self.surface.data_model
    }

    /// One bubble per existing child; dangling ids are skipped.
    fn carousel(&mut self, id: &'a str, children: &'a Children) -> Carousel {
        self.chain.push(id);
        let mut bubbles = Vec::new();
        for child_id in children.ids() {
            let Some(child) = self.surface.get_component(child_id) else {
                ::log::debug!("[LINE] Skipping missing carousel child {child_id}");
                continue;
            };
            bubbles.push(Bubble {
                body: self.layout(child_id, child),
            });
        }
        self.chain.pop();
        Carousel { contents: bubbles }
    }

    /// Compile to a box, wrapping non-box elements in a vertical box.
    fn layout(&mut self, id: &'a str, component: &'a Component) -> FlexBox {
        if let Some(diagnostic) = self.guard(id) {
            return FlexBox::vertical(vec![diagnostic.into()]);
        }
        self.chain.push(id);
        let out = match self.element_body(id, component) {
            FlexComponent::Box(b) => b,
            element => FlexBox::vertical(vec![element]),
        };
        self.chain.pop();
        out
    }

    /// Compile to the flex component matching the component kind.
    fn element(&mut self, id: &'a str, component: &'a Component) -> FlexComponent {
        if let Some(diagnostic) = self.guard(id) {
            return diagnostic.into();
        }
        self.chain.push(id);
        let out = self.element_body(id, component);
        self.chain.pop();
        out
    }

    fn element_body(&mut self, id: &'a str, component: &'a Component) -> FlexComponent {
        match component {
            Component::Column(props) => self.container(BoxLayout::Vertical, &props.children).into(),
            Component::Row(props) => self.container(BoxLayout::Horizontal, &props.children).into(),
            Component::Text(props) => {
                FlexText::wrapped(resolve_string(props.text.as_ref(), self.data_model()).unwrap_or_default())
                    .into()
            }
            Component::Button(props) => self.button(props).into(),
            Component::Card(props) => self.card(id, component, props),
            Component::Confirm(props) => confirm_box(props, self.data_model()).into(),
            other => unsupported(other.kind_name(), id).into(),
        }
    }

    fn container(&mut self, layout: BoxLayout, children: &'a Children) -> FlexBox {
        let mut contents = Vec::new();
        for child_id in children.ids() {
            match self.surface.get_component(child_id) {
                Some(child) => contents.push(self.element(child_id, child)),
                None => ::log::debug!("[LINE] Skipping missing child {child_id}"),
            }
        }
        FlexBox::new(layout, contents)
    }

    fn button(&self, props: &ButtonProps) -> FlexButton {
        let label = props
            .child
            .as_deref()
            .and_then(|child_id| self.surface.get_component(child_id))
            .and_then(|child| match child {
                Component::Text(text) => resolve_string(text.text.as_ref(), self.data_model()),
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string());
        let name = action_name(props.action.as_ref().and_then(|a| a.name.as_deref()));

        FlexButton {
            style: ButtonStyle::Primary,
            action: MessageAction {
                label,
                text: action_text(name),
            },
            flex: None,
        }
    }

    fn card(&mut self, id: &'a str, component: &'a Component, props: &'a CardProps) -> FlexComponent {
        let Some((child_id, child)) = props
            .child
            .as_deref()
            .and_then(|child_id| Some((child_id, self.surface.get_component(child_id)?)))
        else {
            return unsupported(component.kind_name(), id).into();
        };

        let mut card = FlexBox::vertical(vec![self.layout(child_id, child).into()]);
        card.padding_all = Some("12px".to_string());
        card.border_width = Some("1px".to_string());
        card.border_color = Some("#DDDDDD".to_string());
        card.corner_radius = Some("8px".to_string());
        card.into()
    }

    /// Placeholder when entering `id` would loop or nest too deep.
    fn guard(&self, id: &'a str) -> Option<FlexText> {
        if self.chain.contains(&id) {
            ::log::warn!("[LINE] Cyclic component reference at {id}: {:?}", self.chain);
            Some(diagnostic(format!("[Cyclic component reference: id={id}]")))
        } else if self.chain.len() >= MAX_NESTING_DEPTH {
            ::log::warn!("[LINE] Component nesting deeper than {MAX_NESTING_DEPTH} at {id}");
            Some(diagnostic(format!("[Component nesting too deep: id={id}]")))
        } else {
            None
        }
    }
}

/// Inline confirm: prompt, separator, then a row with both buttons.
fn confirm_box(props: &ConfirmProps, data_model: &DataModel) -> FlexBox {
    let prompt = resolve_string(props.text.as_ref(), data_model)
        .unwrap_or_else(|| DEFAULT_CONFIRM_TEXT.to_string());

    let mut text = FlexText::wrapped(prompt);
    text.weight = Some("bold".to_string());
    text.align = Some("center".to_string());
    text.margin = Some("md".to_string());

    let separator = FlexSeparator {
        margin: Some("lg".to_string()),
    };

    let mut buttons = FlexBox::horizontal(vec![
        confirm_button(props.left_button.as_ref(), ButtonStyle::Secondary, data_model).into(),
        confirm_button(props.right_button.as_ref(), ButtonStyle::Primary, data_model).into(),
    ]);
    buttons.margin = Some("md".to_string());
    buttons.spacing = Some("md".to_string());

    let mut confirm = FlexBox::vertical(vec![text.into(), separator.into(), buttons.into()]);
    confirm.padding_all = Some("20px".to_string());
    confirm
}

fn confirm_button(button: Option<&ConfirmButton>, style: ButtonStyle, data_model: &DataModel) -> FlexButton {
    let Some(button) = button else {
        return FlexButton {
            style: ButtonStyle::Secondary,
            action: MessageAction {
                label: "OK".to_string(),
                text: "OK".to_string(),
            },
            flex: None,
        };
    };

    FlexButton {
        style,
        action: MessageAction {
            label: label_or(button.label.as_ref(), data_model, "OK"),
            text: action_text(action_name(button.action.as_ref().and_then(|a| a.name.as_deref()))),
        },
        flex: Some(1),
    }
}

/// Native confirm template with left then right action.
fn confirm_template(props: &ConfirmProps, data_model: &DataModel, options: &CompileOptions) -> LineMessage {
    let text = resolve_string(props.text.as_ref(), data_model)
        .unwrap_or_else(|| DEFAULT_CONFIRM_TEXT.to_string());

    let action = |button: Option<&ConfirmButton>, default_label: &str| MessageAction {
        label: label_or(button.and_then(|b| b.label.as_ref()), data_model, default_label),
        text: action_text(action_name(
            button.and_then(|b| b.action.as_ref()).and_then(|a| a.name.as_deref()),
        )),
    };

    LineMessage::Template {
        alt_text: options.alt_text.clone(),
        template: ConfirmTemplate {
            text: truncate_chars(&text, CONFIRM_TEXT_MAX_CHARS),
            actions: [
                action(props.left_button.as_ref(), "No"),
                action(props.right_button.as_ref(), "Yes"),
            ],
        },
    }
}

fn location(props: &LocationProps, data_model: &DataModel) -> LineMessage {
    LineMessage::Location {
        title: resolve_string(props.title.as_ref(), data_model)
            .unwrap_or_else(|| DEFAULT_LOCATION_TITLE.to_string()),
        address: resolve_string(props.address.as_ref(), data_model).unwrap_or_default(),
        latitude: coerce_f64(props.latitude.as_ref(), data_model),
        longitude: coerce_f64(props.longitude.as_ref(), data_model),
    }
}

fn imagemap(props: &ImagemapProps, data_model: &DataModel, options: &CompileOptions) -> LineMessage {
    let size = props.base_size.as_ref().and_then(Value::as_object);
    let side = |key: &str| {
        size.and_then(|s| s.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(IMAGEMAP_BASE_WIDTH)
    };

    LineMessage::Imagemap {
        base_url: label_or(props.base_url.as_ref(), data_model, ""),
        alt_text: label_or(props.alt_text.as_ref(), data_model, &options.alt_text),
        base_size: ImagemapSize {
            width: side("width"),
            height: side("height"),
        },
        actions: props.actions.iter().filter_map(imagemap_action).collect(),
    }
}

/// Map one flat protocol action; unreadable ones are dropped.
fn imagemap_action(raw: &Value) -> Option<ImagemapAction> {
    let Some(action) = raw.as_object() else {
        ::log::warn!("[LINE] Dropping imagemap action that is not an object: {raw}");
        return None;
    };
    let text_field = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| action.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    };

    let area = match action.get("area").map(|a| serde_json::from_value::<ImagemapArea>(a.clone())) {
        Some(Ok(area)) => area,
        _ => {
            ::log::warn!("[LINE] Dropping imagemap action without a readable area: {raw}");
            return None;
        }
    };
    let label = text_field(&["label"]);

    match action.get("type").and_then(Value::as_str) {
        Some("uri") => Some(ImagemapAction::Uri {
            link_uri: text_field(&["linkUri", "uri", "url"])?,
            area,
            label,
        }),
        Some("message") => Some(ImagemapAction::Message {
            text: text_field(&["text"])?,
            area,
            label,
        }),
        Some("clipboard") => Some(ImagemapAction::Clipboard {
            clipboard_text: text_field(&["clipboardText", "text"])?,
            area,
            label,
        }),
        other => {
            ::log::warn!("[LINE] Dropping imagemap action of type {other:?}");
            None
        }
    }
}

fn audio(props: &AudioProps, data_model: &DataModel) -> LineMessage {
    LineMessage::Audio {
        original_content_url: label_or(props.url.as_ref(), data_model, ""),
        duration: props.duration.clone(),
    }
}

fn video(props: &VideoProps, data_model: &DataModel) -> LineMessage {
    LineMessage::Video {
        original_content_url: label_or(props.url.as_ref(), data_model, ""),
        preview_image_url: label_or(props.preview_url.as_ref(), data_model, ""),
    }
}

/// Placeholder for a kind that cannot be rendered.
pub fn unsupported(kind: &str, id: &str) -> FlexText {
    diagnostic(format!("[Unsupported component: {kind} id={id}]"))
}

fn diagnostic(text: String) -> FlexText {
    let mut text = FlexText::wrapped(text);
    text.color = Some("#999999".to_string());
    text.size = Some("sm".to_string());
    text
}

fn label_or(label: Option<&Label>, data_model: &DataModel, default: &str) -> String {
    label
        .and_then(|l| l.resolve_string(data_model))
        .unwrap_or_else(|| default.to_string())
}

fn action_name(name: Option<&str>) -> &str {
    name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_ACTION_NAME)
}

/// The text a tap sends back: `@action <name>`.
pub fn action_text(name: &str) -> String {
    format!("@action {name}")
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Coerce a raw coordinate to `f64`.
///
/// Numbers and numeric strings are taken as-is, bound values are resolved
/// first; everything else, and non-finite results, is `0.0`.
fn coerce_f64(raw: Option<&Value>, data_model: &DataModel) -> f64 {
    let number = |v: &Value| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let value = match raw {
        Some(object @ Value::Object(_)) => number(&BoundValue::from_json(object).resolve(data_model)),
        Some(other) => number(other),
        None => None,
    };
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// One-line description of a message for logs.
pub fn summarize(message: &LineMessage) -> String {
    let value = serde_json::to_value(message).unwrap_or(Value::Object(Map::new()));
    let detail = match message {
        LineMessage::Text { text } => text.clone(),
        _ => value
            .get("altText")
            .and_then(display_string)
            .unwrap_or_default(),
    };
    format!("{} {}", message.type_name(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2ui::{A2uiMessage, SurfaceStore};
    use serde_json::json;

    fn compile_batch(batch: Value) -> Value {
        let mut store = SurfaceStore::new();
        let messages: Vec<A2uiMessage> = serde_json::from_value(batch).unwrap();
        store.process_messages(messages);
        serde_json::to_value(store.compile("main", &CompileOptions::with_alt_text("demo"))).unwrap()
    }

    fn surface_with(components: Value) -> Value {
        compile_batch(json!([
            {"surfaceUpdate": {"surfaceId": "main", "components": components}},
            {"beginRendering": {"surfaceId": "main", "root": "root"}}
        ]))
    }

    #[test]
    fn test_column_with_text_and_button() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Column": {"children": {"explicitList": ["t", "b"]}}}},
            {"id": "t", "component": {"Text": {"text": {"literalString": "Hello"}}}},
            {"id": "b", "component": {"Button": {"child": "bt", "action": {"name": "ok"}}}},
            {"id": "bt", "component": {"Text": {"text": {"literalString": "OK"}}}}
        ]));

        assert_eq!(
            msg,
            json!({
                "type": "flex",
                "altText": "demo",
                "contents": {
                    "type": "bubble",
                    "body": {
                        "type": "box",
                        "layout": "vertical",
                        "contents": [
                            {"type": "text", "text": "Hello", "wrap": true},
                            {
                                "type": "button",
                                "style": "primary",
                                "action": {"type": "message", "label": "OK", "text": "@action ok"}
                            }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_carousel_of_cards() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Carousel": {"children": {"explicitList": ["c1", "missing", "c2"]}}}},
            {"id": "c1", "component": {"Card": {"child": "t1"}}},
            {"id": "t1", "component": {"Text": {"text": {"literalString": "Card 1"}}}},
            {"id": "c2", "component": {"Card": {"child": "t2"}}},
            {"id": "t2", "component": {"Text": {"text": {"literalString": "Card 2"}}}}
        ]));

        assert_eq!(msg["type"], "flex");
        assert_eq!(msg["contents"]["type"], "carousel");
        let bubbles = msg["contents"]["contents"].as_array().unwrap();
        assert_eq!(bubbles.len(), 2);

        for (bubble, expected) in bubbles.iter().zip(["Card 1", "Card 2"]) {
            assert_eq!(bubble["type"], "bubble");
            let card = &bubble["body"];
            assert_eq!(card["type"], "box");
            assert_eq!(card["paddingAll"], "12px");
            assert_eq!(card["borderColor"], "#DDDDDD");
            assert_eq!(card["cornerRadius"], "8px");
            assert_eq!(card["contents"].as_array().unwrap().len(), 1);
            let inner = &card["contents"][0];
            assert_eq!(inner["type"], "box");
            assert_eq!(inner["contents"][0], json!({"type": "text", "text": expected, "wrap": true}));
        }
    }

    #[test]
    fn test_empty_carousel() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Carousel": {"children": {"explicitList": ["gone"]}}}}
        ]));
        assert_eq!(msg["contents"], json!({"type": "carousel", "contents": []}));
    }

    #[test]
    fn test_confirm_template() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Confirm": {
                "text": {"literalString": "Are you sure?"},
                "leftButton": {"label": "No", "action": {"name": "cancel"}},
                "rightButton": {"label": "Yes", "action": {"name": "submit"}}
            }}}
        ]));

        assert_eq!(
            msg,
            json!({
                "type": "template",
                "altText": "demo",
                "template": {
                    "type": "confirm",
                    "text": "Are you sure?",
                    "actions": [
                        {"type": "message", "label": "No", "text": "@action cancel"},
                        {"type": "message", "label": "Yes", "text": "@action submit"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_confirm_template_defaults_and_truncation() {
        let long: String = "あ".repeat(300);
        let msg = surface_with(json!([
            {"id": "root", "component": {"Confirm": {"text": {"literalString": long}}}}
        ]));
        let template = &msg["template"];
        assert_eq!(template["text"].as_str().unwrap().chars().count(), CONFIRM_TEXT_MAX_CHARS);
        assert_eq!(template["actions"][0], json!({"type": "message", "label": "No", "text": "@action action"}));
        assert_eq!(template["actions"][1], json!({"type": "message", "label": "Yes", "text": "@action action"}));

        let msg = surface_with(json!([{"id": "root", "component": {"Confirm": {}}}]));
        assert_eq!(msg["template"]["text"], DEFAULT_CONFIRM_TEXT);
    }

    #[test]
    fn test_confirm_text_from_data_model() {
        let msg = compile_batch(json!([
            {"surfaceUpdate": {"surfaceId": "main", "components": [
                {"id": "root", "component": {"Confirm": {"text": {"path": "/booking/prompt"}}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "main", "path": "/booking", "contents": [
                {"key": "prompt", "valueString": "Book for 2?"}
            ]}},
            {"beginRendering": {"surfaceId": "main", "root": "root"}}
        ]));
        assert_eq!(msg["template"]["text"], "Book for 2?");
    }

    #[test]
    fn test_location() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Location": {
                "title": {"literalString": "LINE Hub"},
                "address": {"literalString": "1-3-3 Shibuya, Shibuya-ku, Tokyo, 150-0002"},
                "latitude": 35.65910807942215,
                "longitude": 139.70372892916203
            }}}
        ]));
        assert_eq!(
            msg,
            json!({
                "type": "location",
                "title": "LINE Hub",
                "address": "1-3-3 Shibuya, Shibuya-ku, Tokyo, 150-0002",
                "latitude": 35.65910807942215,
                "longitude": 139.70372892916203
            })
        );
    }

    #[test]
    fn test_location_defaults() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Location": {"latitude": "35.5", "longitude": "east"}}}
        ]));
        assert_eq!(msg["title"], "Location");
        assert_eq!(msg["address"], "");
        assert_eq!(msg["latitude"], 35.5);
        assert_eq!(msg["longitude"], 0.0);
    }

    #[test]
    fn test_imagemap() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Imagemap": {
                "baseUrl": {"literalString": "https://example.com/images"},
                "altText": {"literalString": "Alt Text"},
                "baseSize": {"width": 1040, "height": 700},
                "actions": [
                    {"type": "uri", "linkUri": "https://example.com", "area": {"x": 0, "y": 0, "width": 520, "height": 700}},
                    {"type": "message", "text": "hello", "area": {"x": 520, "y": 0, "width": 520, "height": 700}},
                    {"type": "uri", "uri": "https://alias.example.com", "area": {"x": 0, "y": 0, "width": 1, "height": 1}},
                    {"type": "clipboard", "clipboardText": "copy me", "area": {"x": 0, "y": 700, "width": 1040, "height": 340}},
                    {"type": "postback", "data": "x", "area": {"x": 0, "y": 0, "width": 1, "height": 1}},
                    {"type": "uri", "linkUri": "https://no-area.example.com"}
                ]
            }}}
        ]));

        assert_eq!(msg["type"], "imagemap");
        assert_eq!(msg["baseUrl"], "https://example.com/images");
        assert_eq!(msg["altText"], "Alt Text");
        assert_eq!(msg["baseSize"], json!({"width": 1040, "height": 700}));
        let actions = msg["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0]["linkUri"], "https://example.com");
        assert_eq!(actions[1], json!({
            "type": "message",
            "text": "hello",
            "area": {"x": 520, "y": 0, "width": 520, "height": 700}
        }));
        assert_eq!(actions[2]["linkUri"], "https://alias.example.com");
        assert_eq!(actions[3], json!({
            "type": "clipboard",
            "clipboardText": "copy me",
            "area": {"x": 0, "y": 700, "width": 1040, "height": 340}
        }));
    }

    #[test]
    fn test_imagemap_alt_text_falls_back_to_options() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Imagemap": {"baseUrl": "https://example.com/images"}}}
        ]));
        assert_eq!(msg["altText"], "demo");
        assert_eq!(msg["baseUrl"], "https://example.com/images");
        assert_eq!(msg["baseSize"], json!({"width": 1040, "height": 1040}));
        assert_eq!(msg["actions"], json!([]));
    }

    #[test]
    fn test_audio_and_video() {
        let audio = surface_with(json!([
            {"id": "root", "component": {"Audio": {
                "url": {"literalString": "https://example.com/song.mp3"},
                "duration": 60000
            }}}
        ]));
        assert_eq!(
            audio,
            json!({"type": "audio", "originalContentUrl": "https://example.com/song.mp3", "duration": 60000})
        );

        let untimed = surface_with(json!([
            {"id": "root", "component": {"Audio": {"url": "https://example.com/clip.m4a"}}}
        ]));
        assert_eq!(
            untimed,
            json!({"type": "audio", "originalContentUrl": "https://example.com/clip.m4a"})
        );
        assert!(untimed.get("duration").is_none());

        let video = surface_with(json!([
            {"id": "root", "component": {"Video": {
                "url": {"literalString": "https://example.com/movie.mp4"},
                "previewUrl": {"literalString": "https://example.com/preview.jpg"}
            }}}
        ]));
        assert_eq!(
            video,
            json!({
                "type": "video",
                "originalContentUrl": "https://example.com/movie.mp4",
                "previewImageUrl": "https://example.com/preview.jpg"
            })
        );
    }

    #[test]
    fn test_missing_root_diagnostics() {
        let never_rendered = compile_batch(json!([
            {"surfaceUpdate": {"surfaceId": "main", "components": [
                {"id": "root", "component": {"Text": {"text": {"literalString": "x"}}}}
            ]}}
        ]));
        assert_eq!(never_rendered, json!({"type": "text", "text": MISSING_ROOT_TEXT}));

        let dangling = compile_batch(json!([
            {"beginRendering": {"surfaceId": "main", "root": "ghost"}}
        ]));
        assert_eq!(dangling, json!({"type": "text", "text": ROOT_NOT_FOUND_TEXT}));
    }

    #[test]
    fn test_non_layout_root_is_wrapped_in_box() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Text": {"text": {"path": "/missing"}}}}
        ]));
        assert_eq!(
            msg["contents"]["body"],
            json!({"type": "box", "layout": "vertical", "contents": [{"type": "text", "text": "", "wrap": true}]})
        );
    }

    #[test]
    fn test_card_root_is_not_double_wrapped() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Card": {"child": "content"}}},
            {"id": "content", "component": {"Row": {"children": {"explicitList": ["a"]}}}},
            {"id": "a", "component": {"Text": {"text": {"literalString": "A"}}}}
        ]));
        let body = &msg["contents"]["body"];
        assert_eq!(body["paddingAll"], "12px");
        assert_eq!(body["contents"][0]["layout"], "horizontal");
        assert_eq!(body["contents"][0]["contents"][0]["text"], "A");
    }

    #[test]
    fn test_button_label_fallbacks() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Row": {"children": {"explicitList": ["b1", "b2", "b3", "b4"]}}}},
            {"id": "b1", "component": {"Button": {"action": {"name": "go"}}}},
            {"id": "b2", "component": {"Button": {"child": "nowhere"}}},
            {"id": "b3", "component": {"Button": {"child": "b1"}}},
            {"id": "b4", "component": {"Button": {"child": "empty"}}},
            {"id": "empty", "component": {"Text": {"text": {"path": "/nothing"}}}}
        ]));
        let buttons = msg["contents"]["body"]["contents"].as_array().unwrap();
        assert_eq!(buttons.len(), 4);
        for button in buttons {
            assert_eq!(button["action"]["label"], DEFAULT_BUTTON_LABEL);
        }
        assert_eq!(buttons[0]["action"]["text"], "@action go");
        assert_eq!(buttons[1]["action"]["text"], "@action action");
    }

    #[test]
    fn test_text_bound_to_data_model() {
        let msg = compile_batch(json!([
            {"dataModelUpdate": {"surfaceId": "main", "contents": [
                {"key": "user", "valueMap": [{"key": "name", "valueString": "Aki"}]},
                {"key": "guests", "valueNumber": 4}
            ]}},
            {"surfaceUpdate": {"surfaceId": "main", "components": [
                {"id": "root", "component": {"Column": {"children": {"explicitList": ["name", "guests"]}}}},
                {"id": "name", "component": {"Text": {"text": {"path": "/user/name"}}}},
                {"id": "guests", "component": {"Text": {"text": {"path": "/guests"}}}}
            ]}},
            {"beginRendering": {"surfaceId": "main", "root": "root"}}
        ]));
        let contents = &msg["contents"]["body"]["contents"];
        assert_eq!(contents[0]["text"], "Aki");
        assert_eq!(contents[1]["text"], "4");
    }

    #[test]
    fn test_unsupported_and_broken_components() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Column": {"children": {"explicitList": ["s", "card", "loc", "blank"]}}}},
            {"id": "s", "component": {"Slider": {"min": 0}}},
            {"id": "card", "component": {"Card": {"child": "ghost"}}},
            {"id": "loc", "component": {"Location": {}}},
            {"id": "blank", "component": {}}
        ]));
        let contents = msg["contents"]["body"]["contents"].as_array().unwrap();
        let texts: Vec<&str> = contents.iter().map(|c| c["text"].as_str().unwrap()).collect();
        assert_eq!(
            texts,
            [
                "[Unsupported component: Slider id=s]",
                "[Unsupported component: Card id=card]",
                "[Unsupported component: Location id=loc]",
                "[Unsupported component: Unknown id=blank]",
            ]
        );
        assert_eq!(contents[0]["color"], "#999999");
        assert_eq!(contents[0]["size"], "sm");
    }

    #[test]
    fn test_nested_confirm() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Column": {"children": {"explicitList": ["ask"]}}}},
            {"id": "ask", "component": {"Confirm": {
                "text": {"literalString": "Submit?"},
                "rightButton": {"label": "Go", "action": {"name": "submit"}}
            }}}
        ]));
        let confirm = &msg["contents"]["body"]["contents"][0];
        assert_eq!(confirm["paddingAll"], "20px");
        assert_eq!(confirm["contents"][0]["text"], "Submit?");
        assert_eq!(confirm["contents"][0]["weight"], "bold");
        assert_eq!(confirm["contents"][1], json!({"type": "separator", "margin": "lg"}));

        let row = &confirm["contents"][2];
        assert_eq!(row["layout"], "horizontal");
        assert_eq!(
            row["contents"][0],
            json!({"type": "button", "style": "secondary", "action": {"type": "message", "label": "OK", "text": "OK"}})
        );
        assert_eq!(
            row["contents"][1],
            json!({
                "type": "button",
                "style": "primary",
                "action": {"type": "message", "label": "Go", "text": "@action submit"},
                "flex": 1
            })
        );
    }

    #[test]
    fn test_self_referencing_children_do_not_recurse() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Column": {"children": {"explicitList": ["loop"]}}}},
            {"id": "loop", "component": {"Column": {"children": {"explicitList": ["loop", "root"]}}}}
        ]));
        let inner = &msg["contents"]["body"]["contents"][0]["contents"];
        assert_eq!(inner[0]["text"], "[Cyclic component reference: id=loop]");
        assert_eq!(inner[1]["text"], "[Cyclic component reference: id=root]");
    }

    #[test]
    fn test_card_cycle_is_guarded() {
        let msg = surface_with(json!([
            {"id": "root", "component": {"Card": {"child": "root"}}}
        ]));
        let card = &msg["contents"]["body"];
        assert_eq!(card["contents"][0]["contents"][0]["text"], "[Cyclic component reference: id=root]");
    }

    #[test]
    fn test_deep_nesting_is_cut_off() {
        let mut components = Vec::new();
        for i in 0..100 {
            components.push(json!({
                "id": format!("n{i}"),
                "component": {"Column": {"children": {"explicitList": [format!("n{}", i + 1)]}}}
            }));
        }
        let mut store = SurfaceStore::new();
        store.process_messages(
            serde_json::from_value(json!([
                {"surfaceUpdate": {"surfaceId": "main", "components": components}},
                {"beginRendering": {"surfaceId": "main", "root": "n0"}}
            ]))
            .unwrap(),
        );
        let msg = serde_json::to_string(&store.compile("main", &CompileOptions::default())).unwrap();
        assert!(msg.contains("[Component nesting too deep: id=n32]"));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let mut store = SurfaceStore::new();
        store.process_messages(
            serde_json::from_value(json!([
                {"surfaceUpdate": {"surfaceId": "main", "components": [
                    {"id": "root", "component": {"Carousel": {"children": {"explicitList": ["c1", "c2"]}}}},
                    {"id": "c1", "component": {"Card": {"child": "col"}}},
                    {"id": "c2", "component": {"Mystery": {"x": 1}}},
                    {"id": "col", "component": {"Column": {"children": {"explicitList": ["t", "b"]}}}},
                    {"id": "t", "component": {"Text": {"text": {"literalString": "T"}}}},
                    {"id": "b", "component": {"Button": {"child": "t", "action": {"name": "x"}}}}
                ]}},
                {"beginRendering": {"surfaceId": "main", "root": "root"}}
            ]))
            .unwrap(),
        );
        let options = CompileOptions::default();
        let first = serde_json::to_string(&store.compile("main", &options)).unwrap();
        let second = serde_json::to_string(&store.compile("main", &options)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&LineMessage::text("No surface")), "text No surface");
        let msg = LineMessage::Flex {
            alt_text: "demo".to_string(),
            contents: FlexContainer::Carousel(Carousel { contents: vec![] }),
        };
        assert_eq!(summarize(&msg), "flex demo");
    }
}
