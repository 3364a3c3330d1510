//! Data Transfer Objects (DTOs) for the wire formats.
//!
//! - `websocket`: frames exchanged over `/ws`
//! - `http`: request and response bodies of the HTTP API

pub mod conversion;
pub mod http;
pub mod websocket;
