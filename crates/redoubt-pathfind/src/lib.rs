//! redoubt-pathfind: the CLI front end that wires input loading, the
//! Graph Store and Breach Catalog, the Logic Parser, the Scheduler, the
//! Segment Reducer, and the Mission Assembler into one runnable command.

pub mod error;
pub mod io;
pub mod types;

pub use error::PathfindError;
pub use types::{RunReport, RunRequest};

use std::collections::HashMap;
use std::num::NonZeroUsize;

use redoubt_core::config::EngineConfig;
use redoubt_core::types::{Mission, SegmentEntry, SegmentKey};
use redoubt_engine::{assemble_mission, parse_logic_source, reduce, render_line, Scheduler};
use redoubt_graph::{BreachCatalog, GraphStore};

use error::Result;

/// The top-level engine: load once, run many times against the loaded
/// graph and catalog.
pub struct PathfindEngine {
    config: EngineConfig,
}

impl PathfindEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Load inputs, fill the cache for every leg every mission needs,
    /// reduce each segment, assemble every mission, and return the
    /// combined report.
    pub async fn run(&self, request: RunRequest) -> Result<RunReport> {
        let node_records = io::load_nodes(&request.nodes_path)?;
        let edge_records = io::load_edges(&request.edges_path)?;
        let breach_records = io::load_breach_table(&request.breach_path)?;
        let logic_source = io::read_logic_file(&request.logic_path)?;

        let catalog = BreachCatalog::from_records(breach_records);
        let store = GraphStore::from_records(node_records, edge_records, &catalog)?;

        let missions = parse_logic_source(&logic_source)?;

        let cache = redoubt_engine::SegmentCache::new(self.config.cache_dir.clone())?;
        cache.discard_partial_writes()?;

        let worker_count = self
            .config
            .worker_pool_size(available_parallelism());

        let scheduler = Scheduler::new(store, cache, self.config.budgets, worker_count);

        let mut needed_keys = Vec::new();
        for mission in &missions {
            needed_keys.extend(mission.legs());
        }
        let fill_report = scheduler.fill(needed_keys).await;
        for (key, reason) in &fill_report.failed {
            tracing::warn!(%key, reason = %reason, "segment key left uncached after scheduling");
        }

        let cache = redoubt_engine::SegmentCache::new(self.config.cache_dir.clone())?;
        let store = scheduler.store();

        let mut reduced: HashMap<SegmentKey, SegmentEntry> = HashMap::new();
        for mission in &missions {
            for leg in mission.legs() {
                if reduced.contains_key(&leg) {
                    continue;
                }
                let entry = cache.get(&leg, store)?.unwrap_or_default();
                let trimmed = reduce(
                    &entry,
                    store,
                    self.config.budgets.cutoff_fastest,
                    self.config.budgets.cutoff_lightest,
                );
                reduced.insert(leg, trimmed);
            }
        }

        let mut valid_path_lines = Vec::new();
        let mut valid_path_count = 0usize;
        let mut invalid_path_count = 0usize;
        let mut counter = 0usize;

        for mission in &missions {
            let legs: Vec<SegmentEntry> = mission
                .legs()
                .into_iter()
                .map(|key| reduced.get(&key).cloned().unwrap_or_default())
                .collect();

            let outcome = assemble_mission(&legs, &self.config.budgets);
            invalid_path_count += outcome.invalid.len();
            for assembled in &outcome.valid {
                counter += 1;
                valid_path_count += 1;
                valid_path_lines.push(render_line(counter, assembled, |idx| store.id_of(idx).0.clone()));
            }
        }

        Ok(RunReport {
            mission_count: missions.len(),
            valid_path_count,
            invalid_path_count,
            valid_path_lines,
        })
    }

    /// Re-run the Segment Reducer over an already-populated cache entry
    /// without re-enumerating, for the `reduce` subcommand.
    pub fn reduce_cached_segment(
        &self,
        cache_dir: &std::path::Path,
        store: &GraphStore,
        key: &SegmentKey,
        cutoff_fastest: usize,
        cutoff_lightest: usize,
    ) -> Result<SegmentEntry> {
        let cache = redoubt_engine::SegmentCache::new(cache_dir)?;
        let entry = cache
            .get(key, store)?
            .ok_or_else(|| PathfindError::UnknownSegmentKey {
                from: key.from.0.clone(),
                to: key.to.0.clone(),
            })?;
        Ok(reduce(&entry, store, cutoff_fastest, cutoff_lightest))
    }

    /// Look up a single cached segment for the `cache-inspect` subcommand.
    pub fn inspect_cached_segment(
        &self,
        cache_dir: &std::path::Path,
        store: &GraphStore,
        key: &SegmentKey,
    ) -> Result<Option<SegmentEntry>> {
        let cache = redoubt_engine::SegmentCache::new(cache_dir)?;
        Ok(cache.get(key, store)?)
    }
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Render a parsed [`Mission`]'s canonical string, exposed for the CLI's
/// progress logging.
pub fn mission_label(mission: &Mission) -> String {
    mission.rendered()
}
