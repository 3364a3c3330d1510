//! Domain layer: value objects, entities and the interfaces the hub depends on.
//!
//! Concrete implementations of [`ConnectionRegistry`] and [`MessagePusher`]
//! live in the infrastructure layer.

pub mod entity;
pub mod error;
pub mod identity;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, Connection, Registration, SYSTEM_SENDER, ServiceInfo, SignalEnvelope};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use identity::{IdentityGenerator, RandomIdentityGenerator};
pub use message_pusher::{BroadcastReport, MessagePusher, PusherChannel};
pub use registry::{ConnectionRegistry, Greeting};
pub use value_object::{ConnectionId, Identity, MessageText, SignalKind};
