//! Sharded in-memory key-value store routed by the consistent hash ring.

pub mod repository;
pub mod shard;
pub mod store;

#[cfg(test)]
mod shard_test;

// Re-export main types
pub use repository::Repository;
pub use shard::Shard;
pub use store::ShardStore;
