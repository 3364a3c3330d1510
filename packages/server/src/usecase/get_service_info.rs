//! UseCase: サービス情報取得処理

use std::sync::Arc;

use chrono::{DateTime, Local};
use hubbub_shared::time::Clock;

use crate::domain::{ConnectionRegistry, ServiceInfo};

/// サービス情報取得のユースケース
pub struct GetServiceInfoUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Local>,
}

impl GetServiceInfoUseCase {
    /// 起動時刻として現在時刻を記録して作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        Self {
            registry,
            clock,
            started_at,
        }
    }

    /// サービス情報（バージョン・起動時刻・稼働時間・接続数）を取得
    pub async fn execute(&self) -> ServiceInfo {
        let uptime = (self.clock.now() - self.started_at)
            .to_std()
            .unwrap_or_default();

        ServiceInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: self.started_at,
            uptime,
            online_users: self.registry.count().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{create_test_registry, fixed_clock, fixed_time, register};
    use std::time::Duration;

    #[tokio::test]
    async fn test_service_info_reports_online_users() {
        // テスト項目: 接続数が online_users として返される
        // given (前提条件):
        let registry = create_test_registry();
        let usecase = GetServiceInfoUseCase::new(registry.clone(), fixed_clock());
        let (_a, _conn_a, _rx_a) = register(&registry).await;
        let (_b, _conn_b, _rx_b) = register(&registry).await;

        // when (操作):
        let info = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(info.online_users, 2);
        assert_eq!(info.started_at, fixed_time());
        assert_eq!(info.uptime, Duration::ZERO);
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
