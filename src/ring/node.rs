//! Virtual nodes and the hash arcs they take over.

use std::cmp::Ordering;

/// Stable shard index, assigned in creation order and never reused.
pub type ShardId = usize;

/// One of the `replicas` positions a shard occupies on the ring.
///
/// A node owns every position in `(predecessor.position, self.position]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualNode {
    pub position: f64,
    pub shard: ShardId,
    pub replica: usize,
}

impl VirtualNode {
    pub fn new(position: f64, shard: ShardId, replica: usize) -> Self {
        Self {
            position,
            shard,
            replica,
        }
    }

    /// Label hashed to obtain the node position.
    pub fn label(shard: ShardId, replica: usize) -> String {
        format!("shard{}/replica{}", shard, replica)
    }

    /// Ring order: by position, colliding positions by shard then replica.
    pub fn ring_cmp(&self, other: &Self) -> Ordering {
        self.position
            .total_cmp(&other.position)
            .then(self.shard.cmp(&other.shard))
            .then(self.replica.cmp(&other.replica))
    }
}

/// Arc taken over by a freshly inserted node.
///
/// Keys hashing into `(lower.position, upper.position]` were owned by `origin`
/// before `upper` was inserted and now belong to `upper.shard`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MigrationRange {
    pub lower: VirtualNode,
    pub upper: VirtualNode,
    /// `None` when no other shard was on the ring yet.
    pub origin: Option<ShardId>,
}

impl MigrationRange {
    /// Shard receiving the keys of this arc.
    pub fn target(&self) -> ShardId {
        self.upper.shard
    }

    /// Whether `position` falls in the open-lower, closed-upper arc,
    /// wrapping across the 0/1 boundary when needed.
    #[inline]
    pub fn contains(&self, position: f64) -> bool {
        let (lower, upper) = (self.lower.position, self.upper.position);
        match lower.total_cmp(&upper) {
            Ordering::Less => lower < position && position <= upper,
            Ordering::Greater => position > lower || position <= upper,
            Ordering::Equal => false,
        }
    }
}
