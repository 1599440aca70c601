//! Tests for ring routing and shard addition.

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::hash::{HashAlgorithm, KeyHasher};
    use crate::ring::{Ring, VirtualNode};

    fn ring_with(shards: usize, replicas: usize) -> Ring {
        let mut ring = Ring::new(replicas, KeyHasher::default()).expect("valid ring");
        for _ in 0..shards {
            ring.add_shard();
        }
        ring
    }

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("key-{}", i)).collect()
    }

    #[test]
    fn test_zero_replicas_is_rejected() {
        let err = Ring::new(0, KeyHasher::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_empty_ring_routes_nowhere() {
        let ring = Ring::new(10, KeyHasher::default()).unwrap();
        assert!(ring.is_empty());
        assert_eq!(ring.locate("akey"), None);
        assert_eq!(ring.owner_of(0.5), None);
    }

    #[test]
    fn test_first_shard_has_no_origin() {
        let mut ring = Ring::new(10, KeyHasher::default()).unwrap();
        let ranges = ring.add_shard();

        assert_eq!(ranges.len(), 10);
        assert!(ranges.iter().all(|r| r.origin.is_none() && r.target() == 0));
        assert_eq!(ring.shard_count(), 1);
        for key in keys(100) {
            assert_eq!(ring.locate(&key), Some(0));
        }
    }

    #[test]
    fn test_every_shard_owns_replica_count_nodes_in_order() {
        let ring = ring_with(5, 10);

        assert_eq!(ring.len(), 50);
        for shard in 0..5 {
            assert_eq!(ring.nodes().iter().filter(|n| n.shard == shard).count(), 10);
        }
        assert!(ring
            .nodes()
            .windows(2)
            .all(|w| w[0].ring_cmp(&w[1]).is_lt()));
    }

    #[test]
    fn test_node_positions_come_from_labels() {
        let ring = ring_with(3, 4);
        let hasher = KeyHasher::default();
        for node in ring.nodes() {
            let label = VirtualNode::label(node.shard, node.replica);
            assert_eq!(node.position, hasher.normalized(&label));
        }
        assert_eq!(VirtualNode::label(3, 7), "shard3/replica7");
    }

    #[test]
    fn test_node_owns_its_own_position() {
        let ring = ring_with(4, 10);
        for node in ring.nodes() {
            assert_eq!(ring.owner_of(node.position), Some(node.shard));
        }
    }

    #[test]
    fn test_positions_past_last_node_wrap_to_first() {
        let ring = ring_with(4, 10);
        let first = ring.nodes()[0];
        let last = ring.nodes()[ring.len() - 1];

        assert_eq!(ring.owner_of(1.0), Some(first.shard));
        assert_eq!(ring.owner_of(0.0), Some(first.shard));
        let beyond = f64::from_bits(last.position.to_bits() + 1);
        assert_eq!(ring.owner_of(beyond), Some(first.shard));
    }

    #[test]
    fn test_locate_is_stable_without_topology_change() {
        let ring = ring_with(4, 10);
        for key in keys(500) {
            let first = ring.locate(&key);
            assert!(first.is_some());
            assert_eq!(ring.locate(&key), first);
        }
    }

    #[test]
    fn test_ranges_describe_exactly_the_moved_keys() {
        let before = ring_with(4, 10);
        let mut after = before.clone();
        let ranges = after.add_shard();

        assert_eq!(ranges.len(), 10);
        for range in &ranges {
            assert_eq!(range.target(), 4);
            assert!(range.origin.is_some());
            assert_ne!(range.origin, Some(4));
            assert!(range.contains(range.upper.position));
            assert!(!range.contains(range.lower.position));
        }

        for key in keys(1000) {
            let position = before.position_of(&key);
            let old = before.locate(&key);
            let new = after.locate(&key);
            let covering: Vec<_> = ranges.iter().filter(|r| r.contains(position)).collect();

            if old == new {
                assert!(covering.is_empty(), "{} did not move but is covered", key);
            } else {
                assert_eq!(new, Some(4), "{} moved to an old shard", key);
                assert_eq!(covering.len(), 1, "{} covered by {} ranges", key, covering.len());
                assert_eq!(covering[0].origin, old, "{} came from the wrong shard", key);
            }
        }
    }

    #[test]
    fn test_incremental_growth_matches_full_build() {
        let full = ring_with(6, 10);
        let mut grown = ring_with(4, 10);
        grown.add_shard();
        grown.add_shard();

        assert_eq!(full.nodes(), grown.nodes());
        for key in keys(1000) {
            assert_eq!(full.locate(&key), grown.locate(&key));
        }
    }

    #[test]
    fn test_colliding_positions_order_by_shard_then_replica() {
        // A boundary of 1 sends every label to position 0.
        let hasher = KeyHasher::new(HashAlgorithm::Md5, 1.0).unwrap();
        let mut ring = Ring::new(2, hasher).unwrap();
        ring.add_shard();
        ring.add_shard();
        ring.add_shard();

        let order: Vec<_> = ring.nodes().iter().map(|n| (n.shard, n.replica)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        assert_eq!(ring.locate("anything"), Some(0));

        let ranges = ring.add_shard();
        assert!(ranges.iter().all(|r| r.origin == Some(0)));
        assert!(ranges.iter().all(|r| !r.contains(0.0) && !r.contains(0.5)));
        assert_eq!(ring.locate("anything"), Some(0));
    }

    #[test]
    fn test_wrapping_range() {
        let lower = VirtualNode::new(0.9, 0, 0);
        let upper = VirtualNode::new(0.1, 1, 0);
        let range = crate::ring::MigrationRange {
            lower,
            upper,
            origin: Some(0),
        };

        assert!(range.contains(0.95));
        assert!(range.contains(0.0));
        assert!(range.contains(0.1));
        assert!(!range.contains(0.9));
        assert!(!range.contains(0.5));
    }
}
