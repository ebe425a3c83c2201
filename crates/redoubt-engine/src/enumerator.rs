//! Segment Enumerator: bounded all-simple-paths DFS between two endpoints.
//!
//! Implemented with an explicit frame stack rather than native recursion
//! (Design Notes: deep recursion), so depth is bounded by the heap, not the
//! call stack, and each frame carries the metadata accumulated so far for
//! a cheap admissible-pruning check before it is ever pushed.

use std::collections::HashSet;

use redoubt_core::types::{Budgets, Path, PathMetadata, SegmentEntry};
use redoubt_graph::GraphStore;

use crate::cost::extend;

struct Frame {
    node: u32,
    path: Vec<u32>,
    visited: HashSet<u32>,
    meta: PathMetadata,
}

/// Every simple path from `from` to `to` whose metadata satisfies all
/// three budgets. Emission order is DFS order and is not a contract callers
/// may depend on; within one process it is deterministic for a fixed
/// neighbor ordering.
pub fn enumerate(store: &GraphStore, from: u32, to: u32, budgets: &Budgets) -> SegmentEntry {
    let mut out = Vec::new();
    let mut stack = vec![Frame {
        node: from,
        path: vec![from],
        visited: HashSet::from([from]),
        meta: PathMetadata::ZERO,
    }];

    while let Some(frame) = stack.pop() {
        if frame.path.len() > 1 && frame.node == to {
            if frame.meta.within_budgets(budgets) {
                out.push((Path::new(frame.path.clone()), frame.meta));
            }
            continue;
        }

        for &(neighbor, edge) in store.neighbors(frame.node) {
            if frame.visited.contains(&neighbor) {
                continue;
            }

            let breach = store.node_breach(neighbor);
            let candidate_meta = extend(&frame.meta, edge, breach, budgets);

            // Admissible prune on the monotone axes only (consumables,
            // weight): those only ever grow as a path is extended, so a
            // violation here can never be undone by a later edge. Time is
            // not monotone (a descent edge can contribute negative travel
            // time) and is checked only once a path reaches `to`.
            if !candidate_meta.within_monotone_budgets(budgets) {
                continue;
            }

            let mut visited = frame.visited.clone();
            visited.insert(neighbor);
            let mut path = frame.path.clone();
            path.push(neighbor);

            stack.push(Frame {
                node: neighbor,
                path,
                visited,
                meta: candidate_meta,
            });
        }
    }

    SegmentEntry { paths: out }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redoubt_core::types::{BreachProfile, ToolWeights};
    use redoubt_graph::{BreachCatalog, BreachRecord, EdgeRecord, NodeRecord};

    fn budgets(max_time: i64, max_consum: u32, max_weight: u32) -> Budgets {
        Budgets {
            adv_speed_ft_per_s: 11.0,
            max_time_s: max_time,
            max_consumables_lb: max_consum,
            max_weight_lb: max_weight,
            ascend_fatigue_s_per_ft: 0.5,
            descend_fatigue_s_per_ft: 0.05,
            cutoff_fastest: 0,
            cutoff_lightest: 0,
        }
    }

    fn single_leg_store() -> GraphStore {
        let catalog = BreachCatalog::from_records(vec![BreachRecord {
            material: "steel_door".to_string(),
            breach_time_s: 100,
            consumable_lb: 10,
            tool_weights: ToolWeights([5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        }]);
        let nodes = vec![NodeRecord {
            id: "T1".to_string(),
            material: "steel_door".to_string(),
        }];
        let edges = vec![EdgeRecord {
            from: "start".to_string(),
            to: "T1".to_string(),
            distance_ft: 11.0,
            delta_height_ft: 0.0,
        }];
        GraphStore::from_records(nodes, edges, &catalog).unwrap()
    }

    #[test]
    fn scenario_a_trivial_single_leg() {
        let store = single_leg_store();
        let t1 = store.index_of(&"T1".into()).unwrap();
        let entry = enumerate(&store, store.start_index(), t1, &budgets(200, 50, 50));
        assert_eq!(entry.paths.len(), 1);
        let (path, meta) = &entry.paths[0];
        assert_eq!(path.nodes, vec![store.start_index(), t1]);
        assert_eq!(meta.total_time_s, 101);
        assert_eq!(meta.total_consumable_lb, 10);
        assert_eq!(meta.total_weight_lb, 15);
    }

    #[test]
    fn scenario_e_budget_overflow_yields_no_paths() {
        let store = single_leg_store();
        let t1 = store.index_of(&"T1".into()).unwrap();
        let entry = enumerate(&store, store.start_index(), t1, &budgets(200, 5, 50));
        assert!(entry.paths.is_empty());
    }

    #[test]
    fn every_emitted_path_is_simple() {
        // A <-> B both ways, budgets generous enough to allow revisiting
        // were it not for the visited-set.
        let catalog = BreachCatalog::from_records(vec![BreachRecord {
            material: "m".to_string(),
            breach_time_s: 1,
            consumable_lb: 1,
            tool_weights: ToolWeights::ZERO,
        }]);
        let nodes = vec![
            NodeRecord {
                id: "A".to_string(),
                material: "m".to_string(),
            },
            NodeRecord {
                id: "B".to_string(),
                material: "m".to_string(),
            },
        ];
        let edges = vec![
            EdgeRecord {
                from: "start".to_string(),
                to: "A".to_string(),
                distance_ft: 1.0,
                delta_height_ft: 0.0,
            },
            EdgeRecord {
                from: "A".to_string(),
                to: "B".to_string(),
                distance_ft: 1.0,
                delta_height_ft: 0.0,
            },
            EdgeRecord {
                from: "B".to_string(),
                to: "A".to_string(),
                distance_ft: 1.0,
                delta_height_ft: 0.0,
            },
        ];
        let store = GraphStore::from_records(nodes, edges, &catalog).unwrap();
        let b = store.index_of(&"B".into()).unwrap();
        let entry = enumerate(&store, store.start_index(), b, &budgets(1000, 1000, 1000));
        for (path, _) in &entry.paths {
            let mut seen = HashSet::new();
            assert!(path.nodes.iter().all(|n| seen.insert(*n)));
        }
    }

    #[test]
    fn a_later_descent_can_rescue_a_path_that_looked_over_time_midway() {
        // start->A is 150ft at speed 1 (travel 150, over max_time=100 on
        // its own), but A->B descends 100ft at descend_fatigue=1.0 (travel
        // -100), bringing the completed path back under budget. The walk
        // must not prune at A on the time axis alone.
        let catalog = BreachCatalog::from_records(vec![BreachRecord {
            material: "m".to_string(),
            breach_time_s: 0,
            consumable_lb: 0,
            tool_weights: ToolWeights::ZERO,
        }]);
        let nodes = vec![
            NodeRecord {
                id: "A".to_string(),
                material: "m".to_string(),
            },
            NodeRecord {
                id: "B".to_string(),
                material: "m".to_string(),
            },
        ];
        let edges = vec![
            EdgeRecord {
                from: "start".to_string(),
                to: "A".to_string(),
                distance_ft: 150.0,
                delta_height_ft: 0.0,
            },
            EdgeRecord {
                from: "A".to_string(),
                to: "B".to_string(),
                distance_ft: 0.0,
                delta_height_ft: -100.0,
            },
        ];
        let store = GraphStore::from_records(nodes, edges, &catalog).unwrap();
        let b = store.index_of(&"B".into()).unwrap();
        let budgets = Budgets {
            adv_speed_ft_per_s: 1.0,
            max_time_s: 100,
            max_consumables_lb: 1000,
            max_weight_lb: 1000,
            ascend_fatigue_s_per_ft: 0.5,
            descend_fatigue_s_per_ft: 1.0,
            cutoff_fastest: 0,
            cutoff_lightest: 0,
        };
        let entry = enumerate(&store, store.start_index(), b, &budgets);
        assert_eq!(entry.paths.len(), 1);
        let (_, meta) = &entry.paths[0];
        assert_eq!(meta.total_time_s, 50);
    }

    #[test]
    fn unreachable_endpoint_yields_empty_entry_not_absence() {
        let catalog = BreachCatalog::from_records(vec![BreachRecord {
            material: "m".to_string(),
            breach_time_s: 0,
            consumable_lb: 0,
            tool_weights: ToolWeights::ZERO,
        }]);
        let nodes = vec![NodeRecord {
            id: "Isolated".to_string(),
            material: "m".to_string(),
        }];
        let store = GraphStore::from_records(nodes, vec![], &catalog).unwrap();
        let isolated = store.index_of(&"Isolated".into()).unwrap();
        let entry = enumerate(&store, store.start_index(), isolated, &budgets(100, 100, 100));
        assert!(entry.paths.is_empty());
    }

    #[test]
    fn tool_weights_reported_on_emitted_path() {
        let store = single_leg_store();
        let t1 = store.index_of(&"T1".into()).unwrap();
        let entry = enumerate(&store, store.start_index(), t1, &budgets(200, 50, 50));
        let (_, meta) = &entry.paths[0];
        assert_eq!(meta.tool_weights.0[0], 5);
        let expected: BreachProfile = store.node_breach(t1);
        assert_eq!(meta.tool_weights, expected.tool_weights);
    }
}
