//! LINE Messaging API output
//!
//! Payload types and the compiler that produces them from an A2UI surface.

mod flex;
mod message;

pub use flex::*;
pub use message::*;
