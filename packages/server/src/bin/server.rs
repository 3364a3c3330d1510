//! Presence and signaling hub over WebSocket.
//!
//! Assigns every client an identity, broadcasts chat and presence updates and
//! relays peer-to-peer signaling payloads to a single peer.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hubbub-server
//! cargo run --bin hubbub-server -- --host 127.0.0.1 --port 3027
//! ```

use std::sync::Arc;

use clap::Parser;
use hubbub_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetServiceInfoUseCase,
        PresenceNotifier, RelaySignalUseCase, SendMessageUseCase,
    },
};
use hubbub_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. PresenceNotifier and UseCases
    // 4. Server

    // 1. Create Registry (in-memory, one per process)
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(registry.clone()));

    // 3. Create PresenceNotifier and UseCases
    let presence = Arc::new(PresenceNotifier::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        presence.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        presence,
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(message_pusher));
    let get_service_info_usecase = Arc::new(GetServiceInfoUseCase::new(registry, clock));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        relay_signal_usecase,
        get_service_info_usecase,
    );
    if let Err(e) = server.run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
