//! Shared utilities for the Hubbub workspace.

pub mod logger;
pub mod time;
