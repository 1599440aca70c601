// Metric name constants
pub const KEYS_STORED: &str = "shardring_keys_stored";
pub const KEYS_LOADED: &str = "shardring_keys_loaded";
pub const KEY_MISSES: &str = "shardring_key_misses";
pub const KEYS_MIGRATED: &str = "shardring_keys_migrated";
pub const SHARDS: &str = "shardring_shards";

/// Adds stored keys.
pub fn add_stored(value: u64) {
    metrics::counter!(KEYS_STORED).increment(value);
}

/// Adds successful loads.
pub fn add_loaded(value: u64) {
    metrics::counter!(KEYS_LOADED).increment(value);
}

/// Adds loads of absent keys.
pub fn add_misses(value: u64) {
    metrics::counter!(KEY_MISSES).increment(value);
}

/// Adds keys moved between shards.
pub fn add_migrated(value: u64) {
    if value > 0 {
        metrics::counter!(KEYS_MIGRATED).increment(value);
    }
}

/// Sets the current shard count.
pub fn set_shards(value: usize) {
    metrics::gauge!(SHARDS).set(value as f64);
}
