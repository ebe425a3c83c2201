//! In-memory Graph Store: dense-indexed adjacency plus resolved node costs.
//!
//! Built once from already-parsed [`NodeRecord`]/[`EdgeRecord`] values and a
//! [`BreachCatalog`], read-only afterward. A synthetic `start` node is
//! always present at index `0` with a zero breach profile.

use std::collections::HashMap;

use redoubt_core::types::{BreachProfile, DirectedEdge, NodeId, START_NODE};

use crate::catalog::BreachCatalog;
use crate::error::{GraphError, Result};
use crate::records::{EdgeRecord, NodeRecord};

/// The facility graph: `neighbors`, `edge_cost`, and `node_breach` are the
/// only operations downstream components need.
#[derive(Debug, Clone)]
pub struct GraphStore {
    ids: Vec<NodeId>,
    index_of: HashMap<NodeId, u32>,
    breach: Vec<BreachProfile>,
    adjacency: Vec<Vec<(u32, DirectedEdge)>>,
}

impl GraphStore {
    pub fn from_records(
        nodes: Vec<NodeRecord>,
        edges: Vec<EdgeRecord>,
        catalog: &BreachCatalog,
    ) -> Result<Self> {
        let mut ids = Vec::with_capacity(nodes.len() + 1);
        let mut index_of = HashMap::with_capacity(nodes.len() + 1);
        let mut breach = Vec::with_capacity(nodes.len() + 1);

        ids.push(NodeId::from(START_NODE));
        index_of.insert(NodeId::from(START_NODE), 0);
        breach.push(BreachProfile::ZERO);

        for record in nodes {
            let id = NodeId::from(record.id.clone());
            if index_of.contains_key(&id) {
                return Err(GraphError::DuplicateNode(record.id));
            }
            let profile = catalog.resolve(&record.id, &record.material)?;
            let idx = ids.len() as u32;
            index_of.insert(id.clone(), idx);
            ids.push(id);
            breach.push(profile);
        }

        let mut adjacency = vec![Vec::new(); ids.len()];
        let mut seen_pairs = std::collections::HashSet::new();

        for edge in edges {
            let from_idx = *index_of
                .get(&NodeId::from(edge.from.clone()))
                .ok_or_else(|| GraphError::UnknownEdgeEndpoint {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    unknown: edge.from.clone(),
                })?;
            let to_idx = *index_of
                .get(&NodeId::from(edge.to.clone()))
                .ok_or_else(|| GraphError::UnknownEdgeEndpoint {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    unknown: edge.to.clone(),
                })?;

            if !seen_pairs.insert((from_idx, to_idx)) {
                return Err(GraphError::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }

            adjacency[from_idx as usize].push((
                to_idx,
                DirectedEdge {
                    distance_ft: edge.distance_ft,
                    delta_height_ft: edge.delta_height_ft,
                },
            ));
        }

        Ok(Self {
            ids,
            index_of,
            breach,
            adjacency,
        })
    }

    pub fn index_of(&self, id: &NodeId) -> Option<u32> {
        self.index_of.get(id).copied()
    }

    pub fn id_of(&self, index: u32) -> &NodeId {
        &self.ids[index as usize]
    }

    pub fn neighbors(&self, index: u32) -> &[(u32, DirectedEdge)] {
        &self.adjacency[index as usize]
    }

    pub fn node_breach(&self, index: u32) -> BreachProfile {
        self.breach[index as usize]
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn start_index(&self) -> u32 {
        0
    }
}
