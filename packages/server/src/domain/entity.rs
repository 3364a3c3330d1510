//! Domain entities.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde_json::value::RawValue;

use super::{
    error::MessagePushError,
    message_pusher::PusherChannel,
    value_object::{ConnectionId, Identity, MessageText, SignalKind},
};

/// Sender name used for hub-generated narrative and roster frames
pub const SYSTEM_SENDER: &str = "system";

/// Handle to one client's outbound stream.
///
/// The session owns the socket; the registry only holds clones of this handle.
/// Pushing enqueues the frame for the session's writer task and never blocks.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    outbox: PusherChannel,
}

impl Connection {
    pub fn new(outbox: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            outbox,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Enqueue a serialized frame for this connection
    pub fn push(&self, frame: &str) -> Result<(), MessagePushError> {
        self.outbox
            .send(frame.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub identity: Identity,
    /// Registry size right after the insert
    pub count: usize,
}

/// Chat or system narrative message; forwarded, never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: MessageText,
    pub from: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(text: MessageText, from: impl Into<String>, sent_at: DateTime<Local>) -> Self {
        Self {
            text,
            from: from.into(),
            sent_at,
        }
    }
}

/// Peer-to-peer signaling payload addressed to exactly one identity
#[derive(Debug, Clone)]
pub struct SignalEnvelope {
    pub kind: SignalKind,
    pub from: Identity,
    pub to: Identity,
    /// SDP / ICE body, forwarded byte-for-byte
    pub payload: Option<Box<RawValue>>,
}

/// Process information returned by the `info` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub version: String,
    pub started_at: DateTime<Local>,
    pub uptime: Duration,
    pub online_users: usize,
}
