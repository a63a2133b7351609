//! A2UI Protocol Implementation
//!
//! A2UI (Agent-to-UI) is a declarative JSON protocol for AI agents to generate
//! rich, interactive UIs. This module keeps the state those messages describe.
//!
//! # Architecture
//!
//! ```text
//! A2UI JSON Messages
//!        ↓
//!   SurfaceStore
//!        ↓
//! ┌──────┴──────┐
//! │             │
//! DataModel  Components
//!    │             │
//!    └──────┬──────┘
//!           ↓
//!        Surface ──→ line::compile_surface
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use line_kit::a2ui::*;
//!
//! let json = r#"[{"beginRendering": {"surfaceId": "main", "root": "root"}}]"#;
//! let mut store = SurfaceStore::new();
//! store.process_json(json)?;
//! ```

mod component;
mod data_model;
mod message;
mod processor;
mod value;

pub use component::*;
pub use data_model::*;
pub use message::*;
pub use processor::*;
pub use value::*;
