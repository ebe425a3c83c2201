//! Breach Catalog: resolves a node's material to its cost vector.

use std::collections::HashMap;

use redoubt_core::types::BreachProfile;

use crate::error::{GraphError, Result};
use crate::records::BreachRecord;

/// Material identifier → breach profile. Built once from the breach
/// table's parsed rows, read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct BreachCatalog {
    profiles: HashMap<String, BreachProfile>,
}

impl BreachCatalog {
    pub fn from_records(records: Vec<BreachRecord>) -> Self {
        let mut profiles = HashMap::with_capacity(records.len());
        for r in records {
            profiles.insert(
                r.material,
                BreachProfile {
                    breach_time_s: r.breach_time_s,
                    consumable_weight_lb: r.consumable_lb,
                    tool_weights: r.tool_weights,
                },
            );
        }
        Self { profiles }
    }

    /// Resolve a node's material to its breach profile.
    pub fn resolve(&self, node: &str, material: &str) -> Result<BreachProfile> {
        self.profiles
            .get(material)
            .copied()
            .ok_or_else(|| GraphError::UnknownMaterial {
                node: node.to_string(),
                material: material.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
