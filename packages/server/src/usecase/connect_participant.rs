//! UseCase: 参加者接続処理
//!
//! 1. Registry に接続を登録（Identity の割り当て）
//! 2. 同じ書き込みロックの中で、割り当てた Identity を `init` フレームでその接続だけに積む
//! 3. 在席通知（名簿 → 参加メッセージ）
//!
//! `init` を登録と同じロック内で積むので、他の接続の在席通知が
//! 新しい接続の `init` より先に届くことはない。

use std::sync::Arc;

use crate::{
    domain::{Connection, ConnectionRegistry, Identity, Registration},
    infrastructure::dto::websocket::{InitData, ServerFrame},
};

use super::{error::ConnectError, presence::PresenceNotifier};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    presence: Arc<PresenceNotifier>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, presence: Arc<PresenceNotifier>) -> Self {
        Self { registry, presence }
    }

    /// 参加者接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Registration)` - 割り当てた Identity と登録後の接続数
    /// * `Err(ConnectError)` - 登録失敗（Registry は変更されない）
    pub async fn execute(&self, connection: Connection) -> Result<Registration, ConnectError> {
        let registration = self
            .registry
            .register_with_greeting(connection, &init_frame)
            .await?;

        self.presence
            .announce_joined(&registration.identity, registration.count)
            .await;

        Ok(registration)
    }
}

fn init_frame(identity: &Identity) -> Option<String> {
    let init = ServerFrame::Init(InitData {
        user_id: identity.to_string(),
    });
    match init.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to encode init frame: {}", e);
            None
        }
    }
}
