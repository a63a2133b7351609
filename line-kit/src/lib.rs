//! # Description
//!
//! LINE Kit keeps the UI surfaces an agent describes with the
//! [A2UI](https://a2ui.org) protocol and compiles them into
//! [LINE Messaging API](https://developers.line.biz/en/docs/messaging-api/)
//! payloads.
//!
//! # Features
//!
//! - Lenient parsing of A2UI message batches; one bad message never drops the rest.
//! - JSON Pointer data binding with merge and full-replace updates.
//! - Flex bubbles and carousels, confirm templates, location, imagemap,
//!   audio and video messages.
//! - Visible fallbacks instead of errors for unsupported or broken components.

pub mod a2ui;
pub mod line;

pub mod prelude;
