//! Host adapter - line-delimited JSON protocol over the core session
//!
//! Hosts (renderers, input layers, test drivers) speak this protocol instead
//! of touching the entity store directly: intents in, ack/error plus a fresh
//! observation out.

pub mod adapter;
pub mod level_file;
pub mod protocol;

pub use adapter::{GameAdapter, Outbound};
pub use level_file::{parse_level, LevelFile};
pub use protocol::{parse_message, ErrorCode, ObservationMessage, ParsedMessage};
