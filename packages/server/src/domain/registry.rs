//! ConnectionRegistry trait 定義
//!
//! 接続 ↔ Identity の対応表（正引き・逆引き）へのインターフェース。
//! UseCase 層と MessagePusher はこの trait に依存し、具体的な実装には依存しない。

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::{
    entity::{Connection, Registration},
    error::RegistryError,
    value_object::{ConnectionId, Identity},
};

/// 登録直後、書き込みロックを保持したまま新しい接続に積むフレームを作る関数
///
/// `None` を返した場合は何も積まない。
pub type Greeting = dyn Fn(&Identity) -> Option<String> + Send + Sync;

/// Connection Registry trait
///
/// ## 不変条件
///
/// - 正引き（Connection → Identity）と逆引き（Identity → Connection）は常に互いの逆写像
/// - 両方のマップは一つのロックの下で同時に更新される
/// - ロックを保持したままネットワーク I/O を行わない
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 新しい Identity を割り当てて接続を登録し、登録後の接続数とともに返す
    async fn register(&self, connection: Connection) -> Result<Registration, RegistryError> {
        self.register_with_greeting(connection, &|_: &Identity| -> Option<String> { None })
            .await
    }

    /// 登録と同じ書き込みロックの中で `greeting` のフレームを新しい接続に積む
    ///
    /// 他の接続のブロードキャストは登録後にしか宛先をコピーできないため、
    /// このフレームは必ず新しい接続の最初のフレームになる。
    async fn register_with_greeting(
        &self,
        connection: Connection,
        greeting: &Greeting,
    ) -> Result<Registration, RegistryError>;

    /// 接続を登録解除し、解除後の接続数を返す
    ///
    /// 未登録なら何もせず `None` を返す。
    async fn unregister(&self, connection_id: ConnectionId, identity: &Identity) -> Option<usize>;

    /// Identity に対応する接続を取得
    async fn lookup(&self, identity: &Identity) -> Option<Connection>;

    /// 現在の全 Identity のコピーを取得
    async fn snapshot(&self) -> BTreeSet<Identity>;

    /// ファンアウト用に現在の全接続のコピーを取得
    async fn connections(&self) -> Vec<Connection>;

    /// 接続数を取得
    async fn count(&self) -> usize;
}
