// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::hash::{HashAlgorithm, DEFAULT_BOUNDARY};

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

const DEFAULT_SHARDS: usize = 4;
const DEFAULT_REPLICAS: usize = 10;
const DEFAULT_DATASET_SIZE: usize = 1000;
const DEFAULT_ADD_SHARDS: usize = 2;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "shardring")]
    pub shardring: SettingsBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsBox {
    #[serde(default = "default_env")]
    pub env: String,
    pub logs: Option<Logs>,
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub demo: Demo,
}

impl Default for SettingsBox {
    fn default() -> Self {
        Self {
            env: default_env(),
            logs: None,
            ring: RingConfig::default(),
            demo: Demo::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

/// Ring construction parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RingConfig {
    #[serde(default = "default_shards")]
    pub shards: usize,
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    #[serde(default = "default_boundary")]
    pub boundary: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            shards: DEFAULT_SHARDS,
            replicas: DEFAULT_REPLICAS,
            algorithm: HashAlgorithm::default(),
            boundary: DEFAULT_BOUNDARY,
        }
    }
}

/// Scenario run by the demo binary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Demo {
    #[serde(rename = "dataset_size", default = "default_dataset_size")]
    pub dataset_size: usize,
    #[serde(rename = "add_shards", default = "default_add_shards")]
    pub add_shards: usize,
    #[serde(default = "default_balance")]
    pub balance: bool,
    pub seed: Option<u64>,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            dataset_size: DEFAULT_DATASET_SIZE,
            add_shards: DEFAULT_ADD_SHARDS,
            balance: true,
            seed: None,
        }
    }
}

fn default_env() -> String {
    DEV.to_string()
}

fn default_shards() -> usize {
    DEFAULT_SHARDS
}

fn default_replicas() -> usize {
    DEFAULT_REPLICAS
}

fn default_boundary() -> f64 {
    DEFAULT_BOUNDARY
}

fn default_dataset_size() -> usize {
    DEFAULT_DATASET_SIZE
}

fn default_add_shards() -> usize {
    DEFAULT_ADD_SHARDS
}

fn default_balance() -> bool {
    true
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn ring(&self) -> &RingConfig;
    fn demo(&self) -> &Demo;
}

// Config type alias for convenience
pub type Config = Settings;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.shardring.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.shardring.env == PROD
    }

    fn is_test(&self) -> bool {
        self.shardring.env == TEST
    }

    fn ring(&self) -> &RingConfig {
        &self.shardring.ring
    }

    fn demo(&self) -> &Demo {
        &self.shardring.demo
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        let cfg = Self::from_yaml(&data).with_context(|| format!("load config from {:?}", abs_path))?;
        Ok(cfg)
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(data: &str) -> Result<Self> {
        let cfg: Settings = serde_yaml::from_str(data).context("unmarshal yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects ring parameters the store cannot be built with.
    pub fn validate(&self) -> Result<()> {
        let ring = self.ring();
        if ring.shards == 0 {
            anyhow::bail!("ring.shards must be at least 1");
        }
        if ring.replicas == 0 {
            anyhow::bail!("ring.replicas must be at least 1");
        }
        if !ring.boundary.is_finite() || ring.boundary < 1.0 {
            anyhow::bail!("ring.boundary must be a finite number >= 1, got {}", ring.boundary);
        }
        Ok(())
    }
}

// Test config is always available for integration tests
mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;
