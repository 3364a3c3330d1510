//! UseCase 層
//!
//! ハブの各操作（接続・切断・チャット送信・シグナリング中継・サービス情報取得）と、
//! 在席通知（PresenceNotifier）を提供します。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_service_info;
mod presence;
mod relay_signal;
mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, RelayError, SendMessageError};
pub use get_service_info::GetServiceInfoUseCase;
pub use presence::PresenceNotifier;
pub use relay_signal::RelaySignalUseCase;
pub use send_message::SendMessageUseCase;

#[cfg(test)]
pub(crate) mod test_support;
