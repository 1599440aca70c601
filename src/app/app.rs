// Demo application: store a fabricated dataset, then grow the store.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, ConfigTrait};
use crate::render::population_bars;
use crate::storage::{Repository, ShardStore};

use super::comment::{fake_text, Comment};

/// Outcome of a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub before: Vec<usize>,
    pub after: Vec<usize>,
    pub migrated: usize,
    pub total: usize,
}

/// Owns the store the demo works on; the store is handed explicitly to
/// every model that needs it.
pub struct App {
    cfg: Config,
    store: Arc<ShardStore<String>>,
}

impl App {
    pub fn new(cfg: Config) -> Result<Self> {
        let store = ShardStore::from_config(cfg.ring()).context("failed to build shard store")?;
        Ok(Self {
            cfg,
            store: Arc::new(store),
        })
    }

    pub fn store(&self) -> &Arc<ShardStore<String>> {
        &self.store
    }

    /// Runs the scenario, writing the human readable progress to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Report> {
        let ring = self.cfg.ring();
        let demo = self.cfg.demo();
        let repo: &dyn Repository<String> = self.store.as_ref();

        writeln!(out, "* Creating a repository with {} shards\n", ring.shards)?;

        writeln!(out, "* Generating a dataset with {} comments\n", demo.dataset_size)?;
        let mut rng = match demo.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for id in 0..demo.dataset_size {
            Comment::new(id.to_string(), fake_text(&mut rng))
                .save(repo)
                .with_context(|| format!("failed to save comment {}", id))?;
        }

        writeln!(out, "* Show shards population\n")?;
        let before = repo.population();
        write!(out, "{}", population_bars(&before))?;

        let migrated = self.store.add_shards(demo.add_shards, demo.balance);
        let total = repo.num_keys();
        writeln!(out, "\n* {}/{} keys migrated to new shards\n", migrated, total)?;

        writeln!(out, "* Show shards population\n")?;
        let after = repo.population();
        write!(out, "{}", population_bars(&after))?;

        info!(
            component = "app",
            event = "demo_finished",
            shards = after.len(),
            keys = total,
            migrated = migrated,
            "demo finished"
        );

        Ok(Report {
            before,
            after,
            migrated,
            total,
        })
    }
}
