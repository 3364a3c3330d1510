//! UseCase テスト用のヘルパー

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use hubbub_shared::time::{Clock, FixedClock};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, ConnectionRegistry, Identity},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
    },
};

/// テストで使う固定時刻（12:34:56）
pub fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 5, 1, 12, 34, 56).unwrap()
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(fixed_time()))
}

pub fn create_test_registry() -> Arc<InMemoryConnectionRegistry> {
    Arc::new(InMemoryConnectionRegistry::new())
}

pub fn create_test_pusher(registry: Arc<InMemoryConnectionRegistry>) -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new(registry))
}

/// 接続を登録し、Identity・Connection・受信側を返す
pub async fn register(
    registry: &InMemoryConnectionRegistry,
) -> (Identity, Connection, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = Connection::new(tx);
    let registration = registry.register(connection.clone()).await.unwrap();
    (registration.identity, connection, rx)
}

/// 受信キューに溜まっているフレームを全て JSON として取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}

/// users フレームの名簿を並び替えて取り出す
pub fn roster_of(frame: &Value) -> Vec<String> {
    assert_eq!(frame["type"], "users");
    let text = frame["data"]["text"].as_str().unwrap();
    let mut roster: Vec<String> = text
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    roster.sort();
    roster
}
