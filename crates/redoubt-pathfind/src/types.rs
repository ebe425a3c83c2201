//! Request/response shapes for the `run` and `cache-inspect` CLI surfaces.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Everything needed to drive one full computation: load inputs, fill the
/// cache, reduce, assemble, report.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub edges_path: PathBuf,
    pub nodes_path: PathBuf,
    pub breach_path: PathBuf,
    pub logic_path: PathBuf,
    pub config_path: Option<String>,
}

/// Summary of one completed run, mirroring what the `run` subcommand
/// prints: the valid-paths listing plus headline counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub mission_count: usize,
    pub valid_path_count: usize,
    pub invalid_path_count: usize,
    pub valid_path_lines: Vec<String>,
}
