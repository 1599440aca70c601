// Common test utilities for scenario tests.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hash::HashAlgorithm;
use crate::ring::ShardId;
use crate::storage::ShardStore;

pub const DATASET_SIZE: usize = 1000;

/// Deterministic keys `key-0 .. key-{n-1}`.
pub fn numbered_keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{}", i)).collect()
}

/// Distinct pseudo-random text keys of up to 50 characters.
pub fn random_text_keys(n: usize, seed: u64) -> Vec<String> {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz     ";
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys = Vec::with_capacity(n);
    let mut seen = std::collections::HashSet::with_capacity(n);
    while keys.len() < n {
        let len = rng.gen_range(10..=50);
        let key: String = (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// Store with md5 hashing and every key stored as its own value.
pub fn filled_store(shards: usize, replicas: usize, keys: &[String]) -> ShardStore<String> {
    let store = ShardStore::new(shards, replicas, HashAlgorithm::Md5).expect("valid store");
    for key in keys {
        store.store(key.as_str(), key.clone()).expect("store key");
    }
    store
}

/// Current route of every key.
pub fn routes(store: &ShardStore<String>, keys: &[String]) -> HashMap<String, ShardId> {
    keys.iter()
        .map(|k| (k.clone(), store.locate(k).expect("non-empty ring")))
        .collect()
}

/// Asserts that every shard holds at least one key and less than half of them.
pub fn assert_balanced(population: &[usize]) {
    let total: usize = population.iter().sum();
    for (shard, count) in population.iter().enumerate() {
        assert!(*count > 0, "shard {} is empty: {:?}", shard, population);
        assert!(
            *count < total / 2,
            "shard {} holds {} of {} keys: {:?}",
            shard,
            count,
            total,
            population
        );
    }
}

/// Asserts that every key loads back its own value.
pub fn assert_all_loadable(store: &ShardStore<String>, keys: &[String]) {
    for key in keys {
        match store.load(key) {
            Ok(value) => assert_eq!(&value, key),
            Err(e) => panic!("key {} not loadable: {}", key, e),
        }
    }
}
