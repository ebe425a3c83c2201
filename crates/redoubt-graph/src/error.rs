use thiserror::Error;

/// Errors raised while constructing the Graph Store or Breach Catalog.
/// All are `InputError`-class per the engine's error design: fatal at
/// startup load, never raised once construction succeeds.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("edge ({from}, {to}) references unknown node {unknown}")]
    UnknownEdgeEndpoint {
        from: String,
        to: String,
        unknown: String,
    },

    #[error("duplicate edge for ordered pair ({from}, {to})")]
    DuplicateEdge { from: String, to: String },

    #[error("node {node} references unknown material {material}")]
    UnknownMaterial { node: String, material: String },

    #[error("duplicate node id {0}")]
    DuplicateNode(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
