//! Error types for the redoubt-pathfind binary crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathfindError {
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {path}: {reason} ({line:?})")]
    MalformedRow {
        path: String,
        line: String,
        reason: String,
    },

    #[error(transparent)]
    Graph(#[from] redoubt_graph::GraphError),

    #[error(transparent)]
    Engine(#[from] redoubt_core::error::EngineError),

    #[error("unknown segment key ({from}, {to}): no cache entry on disk")]
    UnknownSegmentKey { from: String, to: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PathfindError>;
