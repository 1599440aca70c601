//! Sorted virtual-node table with routing and shard addition.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Error, Result};
use crate::hash::KeyHasher;

use super::node::{MigrationRange, ShardId, VirtualNode};

/// Consistent hash ring.
///
/// Nodes live in a flat vector sorted by [`VirtualNode::ring_cmp`]; the
/// successor of the last node is the first one. Every known shard owns exactly
/// `replicas` nodes.
#[derive(Debug, Clone)]
pub struct Ring {
    nodes: Vec<VirtualNode>,
    replicas: usize,
    shards: usize,
    hasher: KeyHasher,
}

impl Ring {
    /// Creates an empty ring.
    pub fn new(replicas: usize, hasher: KeyHasher) -> Result<Self> {
        if replicas == 0 {
            return Err(Error::InvalidConfiguration(
                "replica count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            nodes: Vec::new(),
            replicas,
            shards: 0,
            hasher,
        })
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn hasher(&self) -> &KeyHasher {
        &self.hasher
    }

    /// Number of virtual nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Virtual nodes in ring order.
    pub fn nodes(&self) -> &[VirtualNode] {
        &self.nodes
    }

    /// Hash space position of `key`.
    #[inline]
    pub fn position_of(&self, key: &str) -> f64 {
        self.hasher.normalized(key)
    }

    /// Shard owning `key`, or `None` on an empty ring.
    #[inline]
    pub fn locate(&self, key: &str) -> Option<ShardId> {
        self.owner_of(self.position_of(key))
    }

    /// Shard owning `position`: the first node at or after it, wrapping to the
    /// first node past the end of the ring.
    pub fn owner_of(&self, position: f64) -> Option<ShardId> {
        if self.nodes.is_empty() {
            return None;
        }
        let idx = self.nodes.partition_point(|n| n.position < position);
        let idx = if idx == self.nodes.len() { 0 } else { idx };
        Some(self.nodes[idx].shard)
    }

    /// Appends the next shard and inserts its replicas.
    ///
    /// Returns one range per inserted node describing the arc it took over and
    /// the shard that owned that arc before.
    pub fn add_shard(&mut self) -> Vec<MigrationRange> {
        let shard = self.shards;
        self.shards += 1;

        let mut fresh = Vec::with_capacity(self.replicas);
        for replica in 0..self.replicas {
            let position = self.hasher.normalized(&VirtualNode::label(shard, replica));
            let node = VirtualNode::new(position, shard, replica);
            let idx = self.index_of(&node);
            self.nodes.insert(idx, node);
            fresh.push(node);
        }

        let ranges: Vec<MigrationRange> = fresh.iter().map(|node| self.range_for(node)).collect();

        debug!(
            component = "ring",
            event = "shard_added",
            shard = shard,
            replicas = self.replicas,
            nodes = self.nodes.len(),
            "shard added to ring"
        );

        ranges
    }

    /// Insertion index of `node`; for a node already on the ring, its index.
    fn index_of(&self, node: &VirtualNode) -> usize {
        self.nodes
            .partition_point(|n| n.ring_cmp(node) == Ordering::Less)
    }

    fn range_for(&self, node: &VirtualNode) -> MigrationRange {
        let len = self.nodes.len();
        let idx = self.index_of(node);
        let lower = self.nodes[(idx + len - 1) % len];
        let origin = (1..len)
            .map(|step| self.nodes[(idx + step) % len])
            .find(|n| n.shard != node.shard)
            .map(|n| n.shard);

        MigrationRange {
            lower,
            upper: *node,
            origin,
        }
    }
}
