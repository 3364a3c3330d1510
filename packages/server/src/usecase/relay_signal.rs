//! UseCase: シグナリング中継処理
//!
//! ## 処理の流れ
//!
//! 1. `signal` フレームの `data` を `{type, from, to, payload}` として解釈
//! 2. `type` と `to` が空でなく、`payload` がある場合はオブジェクトであることを確認（不正なものは破棄）
//! 3. `from` が空なら送信元の Identity で補完
//! 4. `to` を Registry で逆引き（見つからなければ配信失敗）
//! 5. 見つかった接続だけに `{"type":"signal","data":...}` を送信
//!
//! ブロードキャストとは異なり、一回の中継で書き込むのは高々一つの接続です。
//! 相手がまだ接続していない／既に切断した場合でもバッファリングしません。

use std::sync::Arc;

use serde_json::value::RawValue;

use crate::{
    domain::{Identity, MessagePushError, MessagePusher, SignalEnvelope, SignalKind},
    infrastructure::dto::websocket::{ServerFrame, SignalData},
};

use super::error::RelayError;

/// シグナリング中継のユースケース
pub struct RelaySignalUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// シグナリング中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - フレームを送ってきた接続の Identity
    /// * `data` - `signal` フレームの `data`（未解釈）
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 配信先の Identity
    /// * `Err(RelayError)` - 破棄または配信失敗
    pub async fn execute(
        &self,
        sender: &Identity,
        data: Option<&RawValue>,
    ) -> Result<Identity, RelayError> {
        let envelope = Self::decode(sender, data)?;
        let to = envelope.to.clone();

        if &to == sender {
            return Err(RelayError::SelfAddressed(to.into_string()));
        }

        let kind = envelope.kind.as_str().to_string();
        let from = envelope.from.clone();
        let json = ServerFrame::Signal(envelope.into())
            .to_json()
            .map_err(|e| RelayError::Encode(e.to_string()))?;

        self.message_pusher
            .push_to(&to, &json)
            .await
            .map_err(|e| match e {
                MessagePushError::ClientNotFound(id) => RelayError::TargetNotFound(id),
                MessagePushError::PushFailed(reason) => RelayError::PushFailed(reason),
            })?;

        tracing::debug!("Relayed '{}' from '{}' to '{}'", kind, from, to);
        Ok(to)
    }

    fn decode(sender: &Identity, data: Option<&RawValue>) -> Result<SignalEnvelope, RelayError> {
        let raw = data.ok_or_else(|| RelayError::Malformed("missing data".to_string()))?;
        let wire: SignalData =
            serde_json::from_str(raw.get()).map_err(|e| RelayError::Malformed(e.to_string()))?;

        let kind = SignalKind::new(wire.kind).map_err(|_| RelayError::MissingKind)?;
        let to = Identity::new(wire.to).map_err(|_| RelayError::MissingDestination)?;
        let from = Identity::new(wire.from).unwrap_or_else(|_| sender.clone());
        if let Some(payload) = &wire.payload {
            if !payload.get().trim_start().starts_with('{') {
                return Err(RelayError::Malformed(format!(
                    "payload must be an object, got {}",
                    payload.get()
                )));
            }
        }

        Ok(SignalEnvelope {
            kind,
            from,
            to,
            payload: wire.payload,
        })
    }
}
