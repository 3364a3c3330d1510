//! UseCase errors.

use thiserror::Error;

use crate::domain::RegistryError;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Failed to register connection: {0}")]
    Registry(#[from] RegistryError),
}

/// チャット送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Sender must not be empty")]
    EmptySender,

    #[error("Failed to encode message: {0}")]
    Encode(String),
}

/// シグナリング中継のエラー
///
/// どのエラーも送信元には通知されず、ログに記録されるだけです。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Malformed signaling payload: {0}")]
    Malformed(String),

    #[error("Signaling payload has no kind")]
    MissingKind,

    #[error("Signaling payload has no destination")]
    MissingDestination,

    #[error("Signaling payload addressed to its own sender '{0}'")]
    SelfAddressed(String),

    #[error("Target user {0} not found")]
    TargetNotFound(String),

    #[error("Failed to deliver signaling payload: {0}")]
    PushFailed(String),

    #[error("Failed to encode signaling payload: {0}")]
    Encode(String),
}
