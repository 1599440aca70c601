// Main entrypoint for the shardring demo.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use shardring::app::App;
use shardring::config::{Config, ConfigTrait};
use shardring::hash::HashAlgorithm;

const CONFIG_PATH: &str = "cfg/shardring.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/shardring.cfg.local.yaml";

/// shardring - consistent hashing demo over in-memory shards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    /// Initial number of shards
    #[arg(long)]
    shards: Option<usize>,

    /// Virtual nodes per shard
    #[arg(long)]
    replicas: Option<usize>,

    /// Digest used for keys and replica labels (md5, sha1, sha256, sha512, xxh3, xxh128)
    #[arg(long)]
    algorithm: Option<HashAlgorithm>,

    /// Number of comments to fabricate
    #[arg(long)]
    dataset_size: Option<usize>,

    /// Shards added after the dataset is stored
    #[arg(long)]
    add_shards: Option<usize>,

    /// Add shards without migrating keys
    #[arg(long)]
    no_balance: bool,

    /// Seed for the fabricated dataset
    #[arg(long)]
    seed: Option<u64>,
}

/// Loads the configuration struct from YAML file.
/// Tries the custom path, then the local config, then the default config,
/// then built-in defaults.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        let cfg = Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
        return Ok(cfg);
    }

    for candidate in [CONFIG_PATH_LOCAL, CONFIG_PATH] {
        if PathBuf::from(candidate).exists() {
            return Config::load(candidate)
                .with_context(|| format!("failed to load config from {}", candidate));
        }
    }

    Ok(Config::default())
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_args(cfg: &mut Config, args: &Args) -> Result<()> {
    let ring = &mut cfg.shardring.ring;
    if let Some(shards) = args.shards {
        ring.shards = shards;
    }
    if let Some(replicas) = args.replicas {
        ring.replicas = replicas;
    }
    if let Some(algorithm) = args.algorithm {
        ring.algorithm = algorithm;
    }

    let demo = &mut cfg.shardring.demo;
    if let Some(dataset_size) = args.dataset_size {
        demo.dataset_size = dataset_size;
    }
    if let Some(add_shards) = args.add_shards {
        demo.add_shards = add_shards;
    }
    if args.no_balance {
        demo.balance = false;
    }
    if args.seed.is_some() {
        demo.seed = args.seed;
    }

    cfg.validate()
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or("warn");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = load_cfg(args.cfg.clone())?;
    apply_args(&mut cfg, &args).context("invalid configuration")?;

    configure_logger(&cfg);
    info!(
        component = "main",
        event = "config_loaded",
        shards = cfg.ring().shards,
        replicas = cfg.ring().replicas,
        algorithm = %cfg.ring().algorithm,
        "config loaded"
    );
    if !cfg.demo().balance {
        warn!(
            component = "main",
            event = "balance_disabled",
            "shards will be added without migrating keys"
        );
    }

    let app = App::new(cfg)?;
    let stdout = std::io::stdout();
    app.run(&mut stdout.lock())?;

    Ok(())
}
