//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object `{"type": ..., "data": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Frame type of chat and narrative messages
pub const FRAME_TYPE_MESSAGE: &str = "message";
/// Frame type of relayed signaling
pub const FRAME_TYPE_SIGNAL: &str = "signal";

/// Outer envelope of an inbound frame; `data` is decoded once `type` is known
#[derive(Debug, Deserialize)]
pub struct InboundEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

/// Chat body sent by a client
#[derive(Debug, Deserialize)]
pub struct ClientChatData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: String,
}

/// Frames sent by the hub
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ServerFrame {
    /// Private greeting carrying the assigned identity
    Init(InitData),
    /// Roster snapshot
    Users(ChatData),
    /// Chat or system narrative
    Message(ChatData),
    /// Relayed signaling envelope
    Signal(SignalData),
}

impl ServerFrame {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Serialize)]
pub struct InitData {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatData {
    pub text: String,
    pub from: String,
    /// `HH:MM:SS`
    pub time: String,
}

/// Signaling envelope as it appears on the wire, in both directions
#[derive(Debug, Serialize, Deserialize)]
pub struct SignalData {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub payload: Option<Box<RawValue>>,
}
