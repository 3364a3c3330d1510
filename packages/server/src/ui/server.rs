//! Server execution logic.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetServiceInfoUseCase,
        RelaySignalUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{get_info, health_check, send_message, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Presence and signaling hub server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     send_message_usecase,
///     relay_signal_usecase,
///     get_service_info_usecase,
/// );
/// server.run(&ServerConfig::parse()).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
        get_service_info_usecase: Arc<GetServiceInfoUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_participant_usecase,
                disconnect_participant_usecase,
                send_message_usecase,
                relay_signal_usecase,
                get_service_info_usecase,
            }),
        }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/send", post(send_message))
            .route("/info", get(get_info))
            .route("/api/health", get(health_check))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on an already bound listener until the listener fails
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router()).await
    }

    /// Run the hub server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let local_addr = listener.local_addr()?;
        let public_addr = advertised_addr(local_addr);

        tracing::info!("Hub server listening on {}", local_addr);
        tracing::info!("   WebSocket: ws://{}/ws", public_addr);
        tracing::info!("   Send:      POST http://{}/send", public_addr);
        tracing::info!("   Info:      GET  http://{}/info", public_addr);
        tracing::info!("Press Ctrl+C to stop");

        // Open sessions are abandoned on shutdown, not drained
        tokio::select! {
            result = self.serve(listener) => result?,
            _ = shutdown_signal() => {}
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Address other machines on the LAN can use to reach the listener.
///
/// A wildcard bind is replaced by the host's LAN address, or loopback when no
/// LAN address can be resolved.
fn advertised_addr(local_addr: SocketAddr) -> SocketAddr {
    if !local_addr.ip().is_unspecified() {
        return local_addr;
    }

    let ip = local_ip_address::local_ip().unwrap_or_else(|e| {
        tracing::warn!("Failed to resolve local IP address: {}", e);
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    });
    SocketAddr::new(ip, local_addr.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advertised_addr_keeps_concrete_address() {
        // テスト項目: 具体的なアドレスで待ち受けている場合はそのまま表示する
        // given (前提条件):
        let local_addr: SocketAddr = "127.0.0.1:3027".parse().unwrap();

        // when (操作):
        let addr = advertised_addr(local_addr);

        // then (期待する結果):
        assert_eq!(addr, local_addr);
    }

    #[test]
    fn test_advertised_addr_resolves_wildcard_bind() {
        // テスト項目: 0.0.0.0 で待ち受けている場合は到達可能なアドレスに置き換える
        // given (前提条件):
        let local_addr: SocketAddr = "0.0.0.0:3027".parse().unwrap();

        // when (操作):
        let addr = advertised_addr(local_addr);

        // then (期待する結果):
        assert!(!addr.ip().is_unspecified());
        assert_eq!(addr.port(), 3027);
    }
}
