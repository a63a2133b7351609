//! A2UI Surface Store
//!
//! Applies incoming A2UI messages to the surfaces they name and hands out
//! read-only snapshots for compilation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::Value;

use super::{component::Component, data_model::DataModel, message::*};
use crate::line::{CompileOptions, LineMessage, NO_SURFACE_TEXT, compile_surface};

/// One UI document: its components, data model and root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface {
    /// Surface ID
    pub id: String,

    /// Root component ID, set by `beginRendering`; may dangle
    pub root: Option<String>,

    /// Component definitions by ID
    pub components: HashMap<String, Component>,

    /// Data bound to by component properties
    pub data_model: DataModel,
}

impl Surface {
    /// Create an empty surface
    pub fn new(id: impl Into<String>) -> Self {
        Surface {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Get a component by ID
    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Get all component IDs
    pub fn component_ids(&self) -> impl Iterator<Item = &String> {
        self.components.keys()
    }
}

/// What a processed message did to the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    SurfaceCreated {
        surface_id: String,
    },
    ComponentsUpserted {
        surface_id: String,
        ids: Vec<String>,
    },
    DataModelUpdated {
        surface_id: String,
        path: Option<String>,
        /// `false` when the update was dropped
        applied: bool,
        /// Data model version after the update
        version: u64,
    },
    RenderingBegun {
        surface_id: String,
        root: String,
    },
    SurfaceDeleted {
        surface_id: String,
        /// `false` when there was nothing to delete
        existed: bool,
    },
}

impl StoreEvent {
    pub fn surface_id(&self) -> &str {
        match self {
            StoreEvent::SurfaceCreated { surface_id }
            | StoreEvent::ComponentsUpserted { surface_id, .. }
            | StoreEvent::DataModelUpdated { surface_id, .. }
            | StoreEvent::RenderingBegun { surface_id, .. }
            | StoreEvent::SurfaceDeleted { surface_id, .. } => surface_id,
        }
    }
}

/// Every live surface, keyed by surface ID.
///
/// Mutation goes through `&mut self`, one message at a time; callers that
/// share a store across tasks wrap it in their own lock.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = SurfaceStore::new();
/// store.process_json(r#"[{"beginRendering": {"surfaceId": "main", "root": "root"}}]"#)?;
/// let payload = store.compile("main", &CompileOptions::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurfaceStore {
    surfaces: HashMap<String, Surface>,
}

impl SurfaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a surface by ID
    pub fn surface(&self, surface_id: &str) -> Option<&Surface> {
        self.surfaces.get(surface_id)
    }

    /// All surface IDs, sorted
    pub fn surface_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.surfaces.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn contains(&self, surface_id: &str) -> bool {
        self.surfaces.contains_key(surface_id)
    }

    /// Compile a surface to a LINE message.
    ///
    /// An unknown (or deleted) surface compiles to a diagnostic text message.
    pub fn compile(&self, surface_id: &str, options: &CompileOptions) -> LineMessage {
        match self.surface(surface_id) {
            Some(surface) => compile_surface(surface, options),
            None => {
                ::log::debug!("[A2UI] Compile requested for unknown surface {surface_id}");
                LineMessage::text(NO_SURFACE_TEXT)
            }
        }
    }

    /// Process a single A2UI message
    ///
    /// Returns a list of events that occurred as a result of processing.
    pub fn process_message(&mut self, message: A2uiMessage) -> Vec<StoreEvent> {
        match message {
            A2uiMessage::SurfaceUpdate(msg) => self.process_surface_update(msg),
            A2uiMessage::DataModelUpdate(msg) => self.process_data_model_update(msg),
            A2uiMessage::BeginRendering(msg) => self.process_begin_rendering(msg),
            A2uiMessage::DeleteSurface(msg) => self.process_delete_surface(msg),
        }
    }

    /// Process multiple A2UI messages in order
    pub fn process_messages(&mut self, messages: Vec<A2uiMessage>) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        for message in messages {
            events.extend(self.process_message(message));
        }
        events
    }

    /// Parse and process a JSON string containing A2UI messages.
    ///
    /// Tries strict array parse first. On failure, falls back to
    /// parsing each element individually (skipping malformed ones)
    /// so that one bad message does not drop the rest of the batch.
    /// A single message object is accepted as well.
    pub fn process_json(&mut self, json: &str) -> Result<Vec<StoreEvent>, serde_json::Error> {
        match serde_json::from_str::<Vec<A2uiMessage>>(json) {
            Ok(messages) => return Ok(self.process_messages(messages)),
            Err(e) => {
                ::log::debug!("[A2UI] Strict array parse failed: {e}");
            }
        }

        if let Ok(values) = serde_json::from_str::<Vec<Value>>(json) {
            let mut events = Vec::new();
            for (i, val) in values.into_iter().enumerate() {
                match serde_json::from_value::<A2uiMessage>(val) {
                    Ok(msg) => events.extend(self.process_message(msg)),
                    Err(e) => {
                        ::log::warn!("[A2UI] Skipping message[{i}]: {e}");
                    }
                }
            }
            return Ok(events);
        }

        let message: A2uiMessage = serde_json::from_str(json)?;
        Ok(self.process_message(message))
    }

    // ========================================================================
    // Private processing methods
    // ========================================================================

    /// Get a surface, creating it on first reference.
    fn ensure_surface(&mut self, surface_id: &str, events: &mut Vec<StoreEvent>) -> &mut Surface {
        match self.surfaces.entry(surface_id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                ::log::debug!("[A2UI] Creating surface {surface_id}");
                events.push(StoreEvent::SurfaceCreated {
                    surface_id: surface_id.to_string(),
                });
                entry.insert(Surface::new(surface_id))
            }
        }
    }

    fn process_surface_update(&mut self, msg: SurfaceUpdate) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        let surface = self.ensure_surface(&msg.surface_id, &mut events);

        let mut ids = Vec::with_capacity(msg.components.len());
        for definition in msg.components {
            ids.push(definition.id.clone());
            surface.components.insert(definition.id, definition.component);
        }

        events.push(StoreEvent::ComponentsUpserted {
            surface_id: msg.surface_id,
            ids,
        });
        events
    }

    fn process_data_model_update(&mut self, msg: DataModelUpdate) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        let surface = self.ensure_surface(&msg.surface_id, &mut events);
        let applied = surface
            .data_model
            .apply_update(msg.path.as_deref(), &msg.contents);

        let version = surface.data_model.version();

        events.push(StoreEvent::DataModelUpdated {
            surface_id: msg.surface_id,
            path: msg.path,
            applied,
            version,
        });
        events
    }

    fn process_begin_rendering(&mut self, msg: BeginRendering) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        let surface = self.ensure_surface(&msg.surface_id, &mut events);
        surface.root = Some(msg.root.clone());

        events.push(StoreEvent::RenderingBegun {
            surface_id: msg.surface_id,
            root: msg.root,
        });
        events
    }

    fn process_delete_surface(&mut self, msg: DeleteSurface) -> Vec<StoreEvent> {
        let existed = self.surfaces.remove(&msg.surface_id).is_some();
        if !existed {
            ::log::debug!("[A2UI] Delete of unknown surface {}", msg.surface_id);
        }

        vec![StoreEvent::SurfaceDeleted {
            surface_id: msg.surface_id,
            existed,
        }]
    }
}
