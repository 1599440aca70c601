use super::{Config, Demo, Logs, RingConfig, SettingsBox};
use crate::hash::{HashAlgorithm, DEFAULT_BOUNDARY};

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        shardring: SettingsBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            ring: RingConfig {
                shards: 4,
                replicas: 10,
                algorithm: HashAlgorithm::Md5,
                boundary: DEFAULT_BOUNDARY,
            },
            demo: Demo {
                dataset_size: 1000,
                add_shards: 2,
                balance: true,
                seed: Some(42),
            },
        },
    }
}
