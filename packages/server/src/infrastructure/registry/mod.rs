//! ConnectionRegistry の実装
//!
//! - `inmemory`: `HashMap` と `RwLock` を使ったインメモリ実装

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
