//! Repository abstraction consumed by models that persist through the store.

use crate::error::Result;
use crate::ring::ShardId;

/// Key-value repository backed by sharded storage.
pub trait Repository<V>: Send + Sync {
    /// Stores `value` under `key`, returning the shard that now holds it.
    fn store(&self, key: &str, value: V) -> Result<ShardId>;

    /// Loads the value stored under `key`.
    fn load(&self, key: &str) -> Result<V>;

    /// Number of keys held by each shard, indexed by shard id.
    fn population(&self) -> Vec<usize>;

    /// Total number of stored keys.
    fn num_keys(&self) -> usize {
        self.population().iter().sum()
    }
}
