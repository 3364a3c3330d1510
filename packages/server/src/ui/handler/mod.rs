//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{get_info, health_check, send_message};
pub use websocket::websocket_handler;
