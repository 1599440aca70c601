//! Error types shared by the ring and the shard store.

/// Errors surfaced by ring construction, routing and shard store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("ring has no shards to route to")]
    EmptyRing,
}

pub type Result<T> = std::result::Result<T, Error>;
