//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ送信を抽象化します。
//! 具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::Identity};

/// クライアントの送信キュー（セッションの writer タスクが WebSocket に書き出す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ブロードキャスト結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 送信できた接続数
    pub delivered: usize,
    /// 送信に失敗した接続数（失敗しても他の接続への送信は継続する）
    pub failed: usize,
}

/// メッセージ送信の抽象化
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Identity を解決して、その接続だけにメッセージを送信（ユニキャスト）
    async fn push_to(&self, identity: &Identity, content: &str) -> Result<(), MessagePushError>;

    /// 登録済みの全ての接続にメッセージを送信（ファンアウト）
    async fn broadcast(&self, content: &str) -> BroadcastReport;
}
