//! 在席通知（Presence Notifier）
//!
//! 参加・退出のたびに、次の二つのメッセージをこの順でブロードキャストします。
//!
//! 1. `users`: 現在の名簿（スナップショット）
//! 2. `message`: 「参加しました／退出しました、N 人オンライン」という system メッセージ
//!
//! 名簿が常に人数を含むメッセージより先に届くため、クライアントは
//! 正しいメンバー一覧を表示してから通知を出せます。

use std::sync::Arc;

use hubbub_shared::time::{Clock, format_clock_time};

use crate::{
    domain::{
        ChatMessage, ConnectionRegistry, Identity, MessagePusher, MessageText, SYSTEM_SENDER,
    },
    infrastructure::dto::{
        conversion::roster_text,
        websocket::{ChatData, ServerFrame},
    },
};

/// 在席通知
pub struct PresenceNotifier {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl PresenceNotifier {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 参加を通知（名簿 → 参加メッセージ）
    pub async fn announce_joined(&self, identity: &Identity, count: usize) {
        self.broadcast_roster().await;
        self.broadcast_narrative(format!("👥 User {} joined, {} online", identity, count))
            .await;
        tracing::info!("👥 User '{}' joined, {} online", identity, count);
    }

    /// 退出を通知（名簿 → 退出メッセージ）
    pub async fn announce_left(&self, identity: &Identity, count: usize) {
        self.broadcast_roster().await;
        self.broadcast_narrative(format!("👋 User {} left, {} online", identity, count))
            .await;
        tracing::info!("👋 User '{}' left, {} online", identity, count);
    }

    async fn broadcast_roster(&self) {
        let roster = self.registry.snapshot().await;
        let frame = ServerFrame::Users(ChatData {
            text: roster_text(&roster),
            from: SYSTEM_SENDER.to_string(),
            time: format_clock_time(&self.clock.now()),
        });
        self.broadcast(&frame).await;
    }

    async fn broadcast_narrative(&self, text: String) {
        let Ok(text) = MessageText::new(text) else {
            return;
        };
        let message = ChatMessage::new(text, SYSTEM_SENDER, self.clock.now());
        self.broadcast(&ServerFrame::Message(message.into())).await;
    }

    async fn broadcast(&self, frame: &ServerFrame) {
        match frame.to_json() {
            Ok(json) => {
                self.message_pusher.broadcast(&json).await;
            }
            Err(e) => tracing::error!("Failed to encode presence frame: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{
        create_test_pusher, create_test_registry, drain, fixed_clock, register, roster_of,
    };

    #[tokio::test]
    async fn test_announce_joined_sends_roster_before_narrative() {
        // テスト項目: 参加通知では名簿が人数付きメッセージより先に届く
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher(registry.clone());
        let notifier = PresenceNotifier::new(registry.clone(), pusher, fixed_clock());
        let (alice, _conn_a, mut rx_a) = register(&registry).await;
        let (bob, _conn_b, mut rx_b) = register(&registry).await;

        // when (操作):
        notifier.announce_joined(&bob, 2).await;

        // then (期待する結果):
        for rx in [&mut rx_a, &mut rx_b] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 2);
            let mut expected = vec![alice.to_string(), bob.to_string()];
            expected.sort();
            assert_eq!(roster_of(&frames[0]), expected);
            assert_eq!(frames[1]["type"], "message");
            assert_eq!(frames[1]["data"]["from"], "system");
            assert_eq!(frames[1]["data"]["time"], "12:34:56");
            let text = frames[1]["data"]["text"].as_str().unwrap();
            assert!(text.contains(bob.as_str()));
            assert!(text.contains("joined, 2 online"));
        }
    }

    #[tokio::test]
    async fn test_announce_left_excludes_departed_identity() {
        // テスト項目: 退出通知の名簿には退出したユーザーが含まれない
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher(registry.clone());
        let notifier = PresenceNotifier::new(registry.clone(), pusher, fixed_clock());
        let (alice, _conn_a, mut rx_a) = register(&registry).await;
        let (bob, conn_b, _rx_b) = register(&registry).await;
        let count = registry.unregister(conn_b.id(), &bob).await.unwrap();

        // when (操作):
        notifier.announce_left(&bob, count).await;

        // then (期待する結果):
        let frames = drain(&mut rx_a);
        assert_eq!(frames.len(), 2);
        assert_eq!(roster_of(&frames[0]), vec![alice.to_string()]);
        assert!(
            frames[1]["data"]["text"]
                .as_str()
                .unwrap()
                .contains("left, 1 online")
        );
    }

    #[tokio::test]
    async fn test_announce_left_with_empty_registry() {
        // テスト項目: 最後の参加者が退出しても（送信先がなくても）エラーにならない
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher(registry.clone());
        let notifier = PresenceNotifier::new(registry.clone(), pusher, fixed_clock());
        let (alice, conn_a, _rx_a) = register(&registry).await;
        registry.unregister(conn_a.id(), &alice).await;

        // when (操作):
        notifier.announce_left(&alice, 0).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 0);
    }
}
