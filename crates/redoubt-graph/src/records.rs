//! Already-parsed external input records.
//!
//! The CSV readers that produce these are an external collaborator (see
//! the engine's scope notes); this crate only ever consumes already-parsed
//! records, never touches a file itself.

use serde::{Deserialize, Serialize};

use redoubt_core::types::ToolWeights;

/// One row of the node table: `node_id,description,material,...`. The
/// description and any trailing columns are not modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub material: String,
}

/// One row of the edge table: `from_node,to_node,distance_ft,delta_height_ft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub distance_ft: f64,
    pub delta_height_ft: f64,
}

/// One row of the breach table, keyed by material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreachRecord {
    pub material: String,
    pub breach_time_s: u32,
    pub consumable_lb: u32,
    pub tool_weights: ToolWeights,
}
