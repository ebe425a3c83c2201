//! CLI entry point for the redoubt-pathfind engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use redoubt_core::config::EngineConfig;
use redoubt_core::types::SegmentKey;
use redoubt_graph::{BreachCatalog, GraphStore};
use redoubt_pathfind::types::RunRequest;
use redoubt_pathfind::{io, PathfindEngine};

#[derive(Parser)]
#[command(name = "redoubt-pathfind")]
#[command(about = "Adversary path-enumeration and mission-assembly engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: redoubt).
    #[arg(short, long, default_value = "redoubt", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Load inputs, fill the cache, reduce, assemble, and print the
    /// valid-paths listing.
    Run {
        #[arg(long)]
        edges: PathBuf,
        #[arg(long)]
        nodes: PathBuf,
        #[arg(long)]
        breach: PathBuf,
        #[arg(long)]
        logic: PathBuf,
    },
    /// Print a cached SegmentEntry for one `(from,to)` key without
    /// re-enumerating.
    CacheInspect {
        #[arg(long)]
        nodes: PathBuf,
        #[arg(long)]
        edges: PathBuf,
        #[arg(long)]
        breach: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Re-run the Segment Reducer over an already-populated cache with
    /// different cutoffs, without re-enumerating.
    Reduce {
        #[arg(long)]
        nodes: PathBuf,
        #[arg(long)]
        edges: PathBuf,
        #[arg(long)]
        breach: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        cutoff_fastest: usize,
        #[arg(long)]
        cutoff_lightest: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = EngineConfig::load(Some(&cli.config))?;

    match cli.command {
        Command::Run {
            edges,
            nodes,
            breach,
            logic,
        } => {
            let engine = PathfindEngine::new(config);
            let report = engine
                .run(RunRequest {
                    edges_path: edges,
                    nodes_path: nodes,
                    breach_path: breach,
                    logic_path: logic,
                    config_path: Some(cli.config.clone()),
                })
                .await?;

            tracing::info!(
                missions = report.mission_count,
                valid = report.valid_path_count,
                invalid = report.invalid_path_count,
                "run complete"
            );
            for line in &report.valid_path_lines {
                println!("{line}");
            }
        }
        Command::CacheInspect {
            nodes,
            edges,
            breach,
            from,
            to,
        } => {
            let store = build_store(&nodes, &edges, &breach)?;
            let engine = PathfindEngine::new(config.clone());
            let key = SegmentKey::new(from, to);
            match engine.inspect_cached_segment(&config.cache_dir, &store, &key)? {
                Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                None => println!("not yet evaluated"),
            }
        }
        Command::Reduce {
            nodes,
            edges,
            breach,
            from,
            to,
            cutoff_fastest,
            cutoff_lightest,
        } => {
            let store = build_store(&nodes, &edges, &breach)?;
            let engine = PathfindEngine::new(config.clone());
            let key = SegmentKey::new(from, to);
            let reduced = engine.reduce_cached_segment(
                &config.cache_dir,
                &store,
                &key,
                cutoff_fastest,
                cutoff_lightest,
            )?;
            println!("{}", serde_json::to_string_pretty(&reduced)?);
        }
    }

    Ok(())
}

fn build_store(nodes: &PathBuf, edges: &PathBuf, breach: &PathBuf) -> anyhow::Result<GraphStore> {
    let node_records = io::load_nodes(nodes)?;
    let edge_records = io::load_edges(edges)?;
    let breach_records = io::load_breach_table(breach)?;
    let catalog = BreachCatalog::from_records(breach_records);
    Ok(GraphStore::from_records(node_records, edge_records, &catalog)?)
}
