//! Tests for shard operations.

#[cfg(test)]
mod tests {
    use super::super::shard::Shard;

    #[test]
    fn test_set_counts_only_new_keys() {
        let shard: Shard<String> = Shard::new(3);
        assert_eq!(shard.id(), 3);
        assert!(shard.is_empty());

        assert!(shard.set("a".to_string(), "1".to_string()));
        assert!(shard.set("b".to_string(), "2".to_string()));
        assert!(!shard.set("a".to_string(), "3".to_string()), "Overwrite is not a new key");

        assert_eq!(shard.len(), 2);
        assert_eq!(shard.get("a").as_deref(), Some("3"));
        assert!(shard.contains("b"));
        assert!(shard.get("c").is_none());
    }

    #[test]
    fn test_extract_moves_matching_entries_out() {
        let mut shard: Shard<u32> = Shard::new(0);
        for i in 0..10u32 {
            shard.set_mut(format!("k{}", i), i);
        }

        let mut taken = shard.extract_mut(|key| key.ends_with('1') || key.ends_with('2'));
        taken.sort();

        assert_eq!(taken, vec![("k1".to_string(), 1), ("k2".to_string(), 2)]);
        assert_eq!(shard.len(), 8);
        assert!(!shard.contains("k1"));
        assert!(shard.contains("k3"));
    }

    #[test]
    fn test_absorb_and_remove() {
        let mut shard: Shard<u32> = Shard::new(1);
        let inserted = shard.absorb_mut(vec![("x".to_string(), 1), ("y".to_string(), 2)]);
        assert_eq!(inserted, 2);
        assert_eq!(shard.len(), 2);

        assert_eq!(shard.remove_mut("x"), Some(1));
        assert_eq!(shard.remove_mut("x"), None);
        assert_eq!(shard.len(), 1);

        let mut keys = shard.keys();
        keys.sort();
        assert_eq!(keys, vec!["y".to_string()]);
    }

    #[test]
    fn test_absorb_keeps_values_already_held() {
        let mut shard: Shard<&str> = Shard::new(2);
        shard.set_mut("x".to_string(), "newer");

        assert!(!shard.insert_absent_mut("x".to_string(), "older"));
        let inserted = shard.absorb_mut(vec![("x".to_string(), "older"), ("y".to_string(), "y")]);

        assert_eq!(inserted, 1);
        assert_eq!(shard.len(), 2);
        assert_eq!(shard.get("x"), Some("newer"));
        assert_eq!(shard.get("y"), Some("y"));
    }

    #[test]
    fn test_walk_stops_early() {
        let shard: Shard<u32> = Shard::new(0);
        for i in 0..5u32 {
            shard.set(format!("k{}", i), i);
        }

        let mut seen = 0;
        shard.walk_r(|_, _| {
            seen += 1;
            seen < 2
        });
        assert_eq!(seen, 2);
    }
}
