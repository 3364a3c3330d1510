//! WebSocket connection handlers.
//!
//! One session per client: `Connecting → Active → Closed`.
//!
//! - Connecting: upgrade, register, send `init`, announce join
//! - Active: read frames in order and dispatch them
//! - Closed: the read side failed or ended; unregister and announce leave
//!
//! Only the read side ends a session. A failing write is logged by the
//! pusher and the session keeps reading until the transport reports an error.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, Identity, MessageText},
    infrastructure::dto::websocket::{
        ClientChatData, FRAME_TYPE_MESSAGE, FRAME_TYPE_SIGNAL, InboundEnvelope,
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::error!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbox into the WebSocket sink.
///
/// Frames are written in the order they were enqueued.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::warn!("Failed to write frame to socket: {}", e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection = Connection::new(tx);
    let connection_id = connection.id();
    let send_task = pusher_loop(rx, sender);

    // Connecting → Active
    let identity = match state.connect_participant_usecase.execute(connection).await {
        Ok(registration) => registration.identity,
        Err(e) => {
            tracing::error!("Failed to register connection '{}': {}", connection_id, e);
            send_task.abort();
            return;
        }
    };
    tracing::info!("Connection '{}' is active as '{}'", connection_id, identity);

    receive_loop(receiver, &state, &identity).await;

    // Active → Closed
    state
        .disconnect_participant_usecase
        .execute(connection_id, &identity)
        .await;
    send_task.abort();
    tracing::info!("Connection '{}' ('{}') closed", connection_id, identity);
}

async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: &AppState,
    identity: &Identity,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error from '{}': {}", identity, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => dispatch_frame(state, identity, text.as_str()).await,
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", identity);
                break;
            }
            Message::Ping(_) => {
                // Pong is sent automatically by the WebSocket protocol
                tracing::debug!("Received ping from '{}'", identity);
            }
            _ => {}
        }
    }
}

/// Classify one inbound text frame and hand it to the matching use case
async fn dispatch_frame(state: &AppState, sender: &Identity, text: &str) {
    let envelope = match serde_json::from_str::<InboundEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Dropping malformed frame from '{}': {}", sender, e);
            return;
        }
    };

    match envelope.kind.as_str() {
        FRAME_TYPE_SIGNAL => {
            if let Err(e) = state
                .relay_signal_usecase
                .execute(sender, envelope.data.as_deref())
                .await
            {
                tracing::warn!("Failed to relay signal from '{}': {}", sender, e);
            }
        }
        FRAME_TYPE_MESSAGE => {
            let Some(data) = envelope.data else {
                tracing::warn!("Dropping chat frame without data from '{}'", sender);
                return;
            };
            let chat = match serde_json::from_str::<ClientChatData>(data.get()) {
                Ok(chat) => chat,
                Err(e) => {
                    tracing::warn!("Dropping malformed chat frame from '{}': {}", sender, e);
                    return;
                }
            };
            let Ok(text) = MessageText::new(chat.text) else {
                tracing::debug!("Dropping empty chat frame from '{}'", sender);
                return;
            };
            let from = if chat.from.is_empty() {
                sender.as_str()
            } else {
                chat.from.as_str()
            };
            if let Err(e) = state.send_message_usecase.execute(from, text).await {
                tracing::warn!("Failed to send message from '{}': {}", sender, e);
            }
        }
        other => {
            tracing::debug!("Ignoring frame of type '{}' from '{}'", other, sender);
        }
    }
}
