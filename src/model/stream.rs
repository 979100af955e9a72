//! Stream metadata record

use serde::{Deserialize, Serialize};

/// An addressable, named sequence of events in the remote store.
///
/// Owned by the store; this client never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stream {
    /// Opaque stream identifier
    pub id: String,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Identifier of the type the stream's events conform to
    pub type_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
