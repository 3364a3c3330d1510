//! Domain errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Identity must not be empty")]
    EmptyIdentity,

    #[error("Message text must not be empty")]
    EmptyMessageText,

    #[error("Signal kind must not be empty")]
    EmptySignalKind,
}

/// Connection registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The connection was registered before; each connection registers once
    #[error("Connection '{0}' is already registered")]
    AlreadyRegistered(String),

    /// Every generated identity collided with a live one
    #[error("Could not generate a free identity after {0} attempts")]
    IdentitySpaceExhausted(usize),
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No live connection is bound to the identity
    #[error("Target '{0}' not found")]
    ClientNotFound(String),

    /// The connection's writer has gone away
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
