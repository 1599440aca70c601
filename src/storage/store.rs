//! Shard store: per-shard maps placed and migrated by the ring.

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::config::RingConfig;
use crate::error::{Error, Result};
use crate::hash::{HashAlgorithm, KeyHasher};
use crate::metrics::meter;
use crate::ring::{MigrationRange, Ring, ShardId};

use super::repository::Repository;
use super::shard::Shard;

const COMP_STORE: &str = "shard-store";

/// Ring and shards, always structurally consistent: shard `i` exists iff the
/// ring holds nodes for shard `i`.
struct Topology<V> {
    ring: Ring,
    shards: Vec<Shard<V>>,
}

impl<V: Clone> Topology<V> {
    fn shard_for(&self, key: &str) -> Result<&Shard<V>> {
        let id = self.ring.locate(key).ok_or(Error::EmptyRing)?;
        Ok(&self.shards[id])
    }

    /// Appends one shard to the ring and the shard list.
    fn grow(&mut self) -> Vec<MigrationRange> {
        let ranges = self.ring.add_shard();
        let id = self.shards.len();
        self.shards.push(Shard::new(id));
        ranges
    }

    /// Moves every key of each range's origin shard that hashes into the range.
    fn migrate(&mut self, ranges: &[MigrationRange]) -> usize {
        let hasher = *self.ring.hasher();
        let mut moved = 0;
        for range in ranges {
            let Some(origin) = range.origin else {
                continue;
            };
            let items = self.shards[origin].extract_mut(|key| range.contains(hasher.normalized(key)));
            if items.is_empty() {
                continue;
            }
            let extracted = items.len();
            let inserted = self.shards[range.target()].absorb_mut(items);
            moved += inserted;
            debug!(
                component = COMP_STORE,
                event = "range_migrated",
                from = origin,
                to = range.target(),
                lower = range.lower.position,
                upper = range.upper.position,
                keys = inserted,
                stale = extracted - inserted,
                "keys migrated"
            );
        }
        moved
    }

    /// Moves every key not held by the shard the ring routes it to. A stranded
    /// copy is dropped when the routed shard already holds the key.
    fn rebalance(&mut self) -> usize {
        let Topology { ring, shards } = self;

        let mut moves: Vec<(ShardId, ShardId, String)> = Vec::new();
        for shard in shards.iter() {
            shard.walk_r(|key, _| {
                if let Some(owner) = ring.locate(key) {
                    if owner != shard.id() {
                        moves.push((shard.id(), owner, key.to_string()));
                    }
                }
                true
            });
        }

        let mut moved = 0;
        let mut dropped = 0;
        for (from, to, key) in moves {
            if let Some(value) = shards[from].remove_mut(&key) {
                if shards[to].insert_absent_mut(key, value) {
                    moved += 1;
                } else {
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            debug!(
                component = COMP_STORE,
                event = "stale_dropped",
                keys = dropped,
                "stale copies dropped"
            );
        }
        moved
    }
}

/// In-memory sharded key-value store routed by a consistent hash ring.
///
/// `store`, `load` and `population` share the topology lock and then lock only
/// the shard they touch. `add_shards` and `rebalance` hold the topology lock
/// exclusively, so no reader can observe a key in the middle of a move.
pub struct ShardStore<V> {
    topology: RwLock<Topology<V>>,
}

impl<V: Clone> ShardStore<V> {
    /// Creates a store with `shards` empty shards of `replicas` virtual nodes
    /// each, hashed with `algorithm` and the default boundary.
    pub fn new(shards: usize, replicas: usize, algorithm: HashAlgorithm) -> Result<Self> {
        Self::with_hasher(shards, replicas, KeyHasher::with_algorithm(algorithm))
    }

    /// Creates a store from the ring section of the configuration.
    pub fn from_config(cfg: &RingConfig) -> Result<Self> {
        let hasher = KeyHasher::new(cfg.algorithm, cfg.boundary)?;
        Self::with_hasher(cfg.shards, cfg.replicas, hasher)
    }

    pub fn with_hasher(shards: usize, replicas: usize, hasher: KeyHasher) -> Result<Self> {
        if shards == 0 {
            return Err(Error::InvalidConfiguration(
                "shard count must be at least 1".to_string(),
            ));
        }

        let mut topology = Topology {
            ring: Ring::new(replicas, hasher)?,
            shards: Vec::with_capacity(shards),
        };
        // Nothing to migrate yet: every shard starts empty.
        for _ in 0..shards {
            topology.grow();
        }

        meter::set_shards(shards);
        info!(
            component = COMP_STORE,
            event = "store_created",
            shards = shards,
            replicas = replicas,
            algorithm = %hasher.algorithm(),
            boundary = hasher.boundary(),
            "shard store created"
        );

        Ok(Self {
            topology: RwLock::new(topology),
        })
    }

    /// Upserts `key`, returning the shard that holds it.
    pub fn store(&self, key: impl Into<String>, value: V) -> Result<ShardId> {
        let key = key.into();
        let topology = self.topology.read();
        let shard = topology.shard_for(&key)?;
        shard.set(key, value);
        meter::add_stored(1);
        Ok(shard.id())
    }

    /// Loads the value stored under `key`.
    pub fn load(&self, key: &str) -> Result<V> {
        let topology = self.topology.read();
        match topology.shard_for(key)?.get(key) {
            Some(value) => {
                meter::add_loaded(1);
                Ok(value)
            }
            None => {
                meter::add_misses(1);
                Err(Error::KeyNotFound(key.to_string()))
            }
        }
    }

    /// Shard the ring currently routes `key` to.
    pub fn locate(&self, key: &str) -> Option<ShardId> {
        self.topology.read().ring.locate(key)
    }

    /// Adds `count` shards. With `balance`, keys whose arc moved to a new shard
    /// are migrated right away; without it they stay where they are and are
    /// unreachable until a later balanced addition or [`ShardStore::rebalance`].
    ///
    /// Returns the number of migrated keys.
    pub fn add_shards(&self, count: usize, balance: bool) -> usize {
        let mut topology = self.topology.write();
        let mut moved = 0;

        for _ in 0..count {
            let ranges = topology.grow();
            let shard = topology.shards.len() - 1;
            if !balance {
                debug!(
                    component = COMP_STORE,
                    event = "shard_added_unbalanced",
                    shard = shard,
                    "shard added without migration"
                );
                continue;
            }
            let migrated = topology.migrate(&ranges);
            debug!(
                component = COMP_STORE,
                event = "shard_added",
                shard = shard,
                migrated = migrated,
                "shard added"
            );
            moved += migrated;
        }

        let shards = topology.shards.len();
        drop(topology);

        meter::set_shards(shards);
        meter::add_migrated(moved as u64);
        info!(
            component = COMP_STORE,
            event = "shards_added",
            added = count,
            shards = shards,
            balance = balance,
            migrated = moved,
            "shards added"
        );
        moved
    }

    /// Same as `add_shards(count, true)`.
    pub fn add_shards_balanced(&self, count: usize) -> usize {
        self.add_shards(count, true)
    }

    /// Moves every key that is not held by the shard the ring routes it to.
    /// Returns the number of moved keys.
    pub fn rebalance(&self) -> usize {
        let moved = self.topology.write().rebalance();
        meter::add_migrated(moved as u64);
        info!(
            component = COMP_STORE,
            event = "rebalanced",
            migrated = moved,
            "store rebalanced"
        );
        moved
    }

    /// Number of keys per shard, indexed by shard id.
    pub fn population(&self) -> Vec<usize> {
        self.topology.read().shards.iter().map(Shard::len).collect()
    }

    pub fn num_shards(&self) -> usize {
        self.topology.read().shards.len()
    }

    pub fn num_keys(&self) -> usize {
        self.population().iter().sum()
    }

    pub fn replicas(&self) -> usize {
        self.topology.read().ring.replicas()
    }

    pub fn hasher(&self) -> KeyHasher {
        *self.topology.read().ring.hasher()
    }
}

impl<V: Clone + Send + Sync> Repository<V> for ShardStore<V> {
    fn store(&self, key: &str, value: V) -> Result<ShardId> {
        ShardStore::store(self, key, value)
    }

    fn load(&self, key: &str) -> Result<V> {
        ShardStore::load(self, key)
    }

    fn population(&self) -> Vec<usize> {
        ShardStore::population(self)
    }

    fn num_keys(&self) -> usize {
        ShardStore::num_keys(self)
    }
}
