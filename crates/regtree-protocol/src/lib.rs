#![forbid(unsafe_code)]

//! Protocol: the message boundary between a host process and a tree panel.
//!
//! Inbound [`HostCommand`]s and outbound [`ViewEvent`]s are the JSON
//! post-message contract; [`record::NodeRecord`] is the permissive wire
//! shape of a node, converted to and from the typed model at this boundary
//! so nothing malformed reaches the engine. [`PanelBridge`] owns one
//! controller and dispatches commands into it, returning the effects and
//! events the shell must replay.

pub mod bridge;
pub mod error;
pub mod messages;
pub mod record;

pub use bridge::{Outcome, PanelBridge};
pub use error::ProtocolError;
pub use messages::{HostCommand, ViewEvent};
pub use record::{MetadataRecord, NodeRecord};
