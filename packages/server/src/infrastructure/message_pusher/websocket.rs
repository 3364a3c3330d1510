//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ブロードキャスト（ファンアウト）: 登録済みの全接続へ送信
//! - ユニキャスト: Identity を逆引きして一つの接続だけに送信
//!
//! ## 設計ノート
//!
//! ブロードキャストでは、Registry の read ロック中に送信先のコピーを取り、
//! ロックを解放してから各接続に書き込みます。遅いクライアントへの書き込みが
//! 他の登録・登録解除をブロックすることはありません。
//!
//! その代わり、コピー取得直後に切断したクライアントにも最後の一通が
//! 送信キューに積まれることがあります（セッション終了とともに破棄される）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    BroadcastReport, ConnectionRegistry, Identity, MessagePushError, MessagePusher,
};

/// WebSocket を使った MessagePusher 実装
///
/// ```ignore
/// let registry = Arc::new(InMemoryConnectionRegistry::new());
/// let pusher = WebSocketMessagePusher::new(registry.clone());
///
/// pusher.broadcast("{\"type\":\"message\",\"data\":{...}}").await;
/// ```
pub struct WebSocketMessagePusher {
    registry: Arc<dyn ConnectionRegistry>,
}

impl WebSocketMessagePusher {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(&self, identity: &Identity, content: &str) -> Result<(), MessagePushError> {
        let connection = self
            .registry
            .lookup(identity)
            .await
            .ok_or_else(|| MessagePushError::ClientNotFound(identity.to_string()))?;

        connection.push(content)?;
        tracing::debug!("Pushed message to client '{}'", identity);
        Ok(())
    }

    async fn broadcast(&self, content: &str) -> BroadcastReport {
        // read ロックはこの呼び出しの中だけで解放される
        let recipients = self.registry.connections().await;

        let mut report = BroadcastReport::default();
        for connection in recipients {
            // ブロードキャストでは一部の送信失敗を許容
            match connection.push(content) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        connection.id(),
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(
            "Broadcasted message to {} connection(s) ({} failed)",
            report.delivered,
            report.failed
        );
        report
    }
}
