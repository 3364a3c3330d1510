//! InMemory Connection Registry 実装
//!
//! 正引き（ConnectionId → Identity, Connection）と逆引き（Identity → ConnectionId）の
//! 二つの `HashMap` を一つの構造体にまとめ、単一の `RwLock` で保護します。
//!
//! - 登録・登録解除: write ロック
//! - lookup / snapshot / connections / count: read ロック
//!
//! どの操作もロック保持中にネットワーク I/O を行いません。

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, Greeting, Identity, IdentityGenerator,
    RandomIdentityGenerator, Registration, RegistryError,
};

/// Identity 衝突時に再生成する最大回数
pub const MAX_IDENTITY_ATTEMPTS: usize = 32;

struct RegistryEntry {
    identity: Identity,
    connection: Connection,
}

#[derive(Default)]
struct RegistryMaps {
    connections: HashMap<ConnectionId, RegistryEntry>,
    identities: HashMap<Identity, ConnectionId>,
}

impl RegistryMaps {
    fn next_free_identity(
        &self,
        generator: &dyn IdentityGenerator,
    ) -> Result<Identity, RegistryError> {
        for _ in 0..MAX_IDENTITY_ATTEMPTS {
            let Ok(candidate) = Identity::new(generator.generate()) else {
                continue;
            };
            if !self.identities.contains_key(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!("Identity '{}' is taken, rolling again", candidate);
        }
        Err(RegistryError::IdentitySpaceExhausted(MAX_IDENTITY_ATTEMPTS))
    }
}

/// インメモリ Connection Registry 実装
pub struct InMemoryConnectionRegistry {
    maps: RwLock<RegistryMaps>,
    generator: Box<dyn IdentityGenerator>,
}

impl InMemoryConnectionRegistry {
    /// ランダムな 6 文字の Identity を割り当てるレジストリを作成
    pub fn new() -> Self {
        Self::with_generator(Box::new(RandomIdentityGenerator::default()))
    }

    /// Identity の生成方法を指定してレジストリを作成
    pub fn with_generator(generator: Box<dyn IdentityGenerator>) -> Self {
        Self {
            maps: RwLock::new(RegistryMaps::default()),
            generator,
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register_with_greeting(
        &self,
        connection: Connection,
        greeting: &Greeting,
    ) -> Result<Registration, RegistryError> {
        let mut maps = self.maps.write().await;

        let connection_id = connection.id();
        if maps.connections.contains_key(&connection_id) {
            return Err(RegistryError::AlreadyRegistered(connection_id.to_string()));
        }

        let identity = maps.next_free_identity(self.generator.as_ref())?;
        // Enqueue only; the writer task does the socket I/O after the lock is gone
        if let Some(frame) = greeting(&identity) {
            if let Err(e) = connection.push(&frame) {
                tracing::warn!("Failed to greet '{}': {}", identity, e);
            }
        }
        maps.identities.insert(identity.clone(), connection_id);
        maps.connections.insert(
            connection_id,
            RegistryEntry {
                identity: identity.clone(),
                connection,
            },
        );
        let count = maps.connections.len();

        tracing::debug!(
            "Connection '{}' registered as '{}' ({} total)",
            connection_id,
            identity,
            count
        );
        Ok(Registration { identity, count })
    }

    async fn unregister(&self, connection_id: ConnectionId, identity: &Identity) -> Option<usize> {
        let mut maps = self.maps.write().await;

        maps.connections.remove(&connection_id)?;
        // A re-rolled identity may now belong to another connection
        if maps.identities.get(identity) == Some(&connection_id) {
            maps.identities.remove(identity);
        }

        let count = maps.connections.len();
        tracing::debug!(
            "Connection '{}' ('{}') unregistered ({} total)",
            connection_id,
            identity,
            count
        );
        Some(count)
    }

    async fn lookup(&self, identity: &Identity) -> Option<Connection> {
        let maps = self.maps.read().await;
        maps.identities
            .get(identity)
            .and_then(|id| maps.connections.get(id))
            .map(|entry| entry.connection.clone())
    }

    async fn snapshot(&self) -> BTreeSet<Identity> {
        let maps = self.maps.read().await;
        maps.identities.keys().cloned().collect()
    }

    async fn connections(&self) -> Vec<Connection> {
        let maps = self.maps.read().await;
        maps.connections
            .values()
            .map(|entry| entry.connection.clone())
            .collect()
    }

    async fn count(&self) -> usize {
        self.maps.read().await.connections.len()
    }
}
