//! UseCase: チャットメッセージ送信処理
//!
//! WebSocket の `message` フレームと `POST /send` の両方から呼ばれ、
//! 送信者自身を含む全ての接続にブロードキャストします。

use std::sync::Arc;

use hubbub_shared::time::Clock;

use crate::{
    domain::{BroadcastReport, ChatMessage, MessagePusher, MessageText},
    infrastructure::dto::websocket::ServerFrame,
};

use super::error::SendMessageError;

/// チャットメッセージ送信のユースケース
pub struct SendMessageUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者名（WebSocket 経由なら Identity）
    /// * `text` - メッセージ本文
    pub async fn execute(
        &self,
        from: &str,
        text: MessageText,
    ) -> Result<BroadcastReport, SendMessageError> {
        if from.is_empty() {
            return Err(SendMessageError::EmptySender);
        }

        let message = ChatMessage::new(text, from, self.clock.now());
        let json = ServerFrame::Message(message.into())
            .to_json()
            .map_err(|e| SendMessageError::Encode(e.to_string()))?;

        tracing::info!("Broadcasting message from '{}'", from);
        Ok(self.message_pusher.broadcast(&json).await)
    }
}
