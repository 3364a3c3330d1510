//! UseCase: 参加者切断処理
//!
//! 1. Registry から接続を登録解除（未登録なら何もしない）
//! 2. 実際に登録解除した場合のみ在席通知（名簿 → 退出メッセージ）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, Identity};

use super::presence::PresenceNotifier;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    presence: Arc<PresenceNotifier>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, presence: Arc<PresenceNotifier>) -> Self {
        Self { registry, presence }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// 登録解除後の接続数（既に登録解除済みなら現在の接続数）
    pub async fn execute(&self, connection_id: ConnectionId, identity: &Identity) -> usize {
        match self.registry.unregister(connection_id, identity).await {
            Some(count) => {
                self.presence.announce_left(identity, count).await;
                count
            }
            None => {
                tracing::debug!("'{}' was already unregistered", identity);
                self.registry.count().await
            }
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
    async fn test_disconnect_participant_notifies_remaining() {
        // テスト項目: A, B, C のうち B が切断すると、残りに名簿 {A,C} と「2 人オンライン」が届く
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher(registry.clone());
        let presence = Arc::new(PresenceNotifier::new(
            registry.clone(),
            pusher,
            fixed_clock(),
        ));
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), presence);
        let (a, _conn_a, mut rx_a) = register(&registry).await;
        let (b, conn_b, mut rx_b) = register(&registry).await;
        let (c, _conn_c, mut rx_c) = register(&registry).await;

        // when (操作):
        let count = usecase.execute(conn_b.id(), &b).await;

        // then (期待する結果):
        assert_eq!(count, 2);
        let mut expected = vec![a.to_string(), c.to_string()];
        expected.sort();
        for rx in [&mut rx_a, &mut rx_c] {
            let frames = drain(rx);
            assert_eq!(frames.len(), 2);
            assert_eq!(roster_of(&frames[0]), expected);
            assert!(
                frames[1]["data"]["text"]
                    .as_str()
                    .unwrap()
                    .contains("left, 2 online")
            );
        }
        assert!(drain(&mut rx_b).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_twice_keeps_count() {
        // テスト項目: 同じ接続の切断処理が二度呼ばれても接続数は変わらず、退出通知も重複しない
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher(registry.clone());
        let presence = Arc::new(PresenceNotifier::new(
            registry.clone(),
            pusher,
            fixed_clock(),
        ));
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), presence);
        let (_a, _conn_a, mut rx_a) = register(&registry).await;
        let (b, conn_b, _rx_b) = register(&registry).await;
        usecase.execute(conn_b.id(), &b).await;
        assert_eq!(drain(&mut rx_a).len(), 2);

        // when (操作):
        let count = usecase.execute(conn_b.id(), &b).await;

        // then (期待する結果):
        assert_eq!(count, 1);
        assert_eq!(registry.count().await, 1);
        assert!(drain(&mut rx_a).is_empty());
    }
}
