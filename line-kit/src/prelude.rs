//! Common imports for compiling A2UI surfaces to LINE messages.

pub use crate::a2ui::{A2uiMessage, StoreEvent, Surface, SurfaceStore};
pub use crate::line::{CompileOptions, LineMessage, compile_surface};
