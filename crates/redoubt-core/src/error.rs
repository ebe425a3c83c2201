use thiserror::Error;

/// Top-level error type for the Redoubt path-enumeration engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Missing or malformed input, an unknown node reference, or an invalid
    /// target-set expression. Fatal when raised during startup load.
    #[error("input error: {0}")]
    Input(String),

    /// A cache artifact failed to write after one retry by the scheduler;
    /// the key is left absent so a later scheduling pass re-enqueues it.
    #[error("cache I/O error for segment ({from}, {to}): {source}")]
    CacheIo {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    /// An endpoint referenced by a leg is not present in the Graph Store.
    #[error("unknown node referenced as segment endpoint: {0}")]
    UnknownNode(String),

    /// A segment's path count and metadata count diverged after enumeration.
    /// Not raised for a whole run; isolated to the offending key.
    #[error("internal inconsistency evaluating segment ({from}, {to}): {detail}")]
    InternalInconsistency {
        from: String,
        to: String,
        detail: String,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
