//! Consistent hashing with virtual nodes over in-memory shards.
//!
//! A [`ring::Ring`] maps hash positions in `[0, 1)` to shards, a
//! [`storage::ShardStore`] keeps one key-value map per shard and migrates only
//! the keys whose arc changes owner when shards are added.

#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod error;
pub mod hash;
pub mod metrics;
pub mod render;
pub mod ring;
pub mod storage;

pub use error::{Error, Result};
pub use hash::{HashAlgorithm, KeyHasher};
pub use ring::{MigrationRange, Ring, ShardId, VirtualNode};
pub use storage::{Repository, ShardStore};
