//! Real-time presence and signaling hub.
//!
//! Clients connect over WebSocket, receive a generated identity, exchange
//! broadcast chat messages and relay peer-to-peer signaling payloads to a
//! single peer by identity.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
