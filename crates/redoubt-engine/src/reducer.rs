//! Segment Reducer: trims an enumerated SegmentEntry to the union of the
//! K-fastest and K-lightest paths.

use std::cmp::Ordering;
use std::collections::HashSet;

use redoubt_core::types::{Path, PathMetadata, SegmentEntry};
use redoubt_graph::GraphStore;

/// `cutoff_fastest`/`cutoff_lightest` of `0` mean "no limit". Ties are
/// broken deterministically by the path's canonical `-`-joined form so the
/// result is reproducible across runs.
pub fn reduce(entry: &SegmentEntry, store: &GraphStore, cutoff_fastest: usize, cutoff_lightest: usize) -> SegmentEntry {
    let canonical = |p: &Path| p.canonical(|idx| store.id_of(idx).0.clone());

    let mut by_time: Vec<&(Path, PathMetadata)> = entry.paths.iter().collect();
    by_time.sort_by(|a, b| {
        a.1.total_time_s
            .cmp(&b.1.total_time_s)
            .then_with(|| canonical(&a.0).cmp(&canonical(&b.0)))
    });

    let mut by_consum: Vec<&(Path, PathMetadata)> = entry.paths.iter().collect();
    by_consum.sort_by(|a, b| {
        a.1.total_consumable_lb
            .cmp(&b.1.total_consumable_lb)
            .then_with(|| canonical(&a.0).cmp(&canonical(&b.0)))
    });

    let fastest_n = if cutoff_fastest == 0 {
        by_time.len()
    } else {
        cutoff_fastest.min(by_time.len())
    };
    let lightest_n = if cutoff_lightest == 0 {
        by_consum.len()
    } else {
        cutoff_lightest.min(by_consum.len())
    };

    let mut kept: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for &(path, meta) in by_time.iter().take(fastest_n) {
        let key = canonical(path);
        if kept.insert(key) {
            out.push((path.clone(), *meta));
        }
    }
    for &(path, meta) in by_consum.iter().take(lightest_n) {
        let key = canonical(path);
        if kept.insert(key) {
            out.push((path.clone(), *meta));
        }
    }

    // Deterministic output ordering: canonical path string.
    out.sort_by(|a, b| canonical(&a.0).cmp(&canonical(&b.0)).then(Ordering::Equal));

    SegmentEntry { paths: out }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redoubt_core::types::ToolWeights;
    use redoubt_graph::{BreachCatalog, BreachRecord, EdgeRecord, NodeRecord};

    fn meta(time: i64, consum: u32) -> PathMetadata {
        PathMetadata {
            total_time_s: time,
            total_consumable_lb: consum,
            total_weight_lb: consum,
            tool_weights: ToolWeights::ZERO,
        }
    }

    fn ten_path_store() -> GraphStore {
        // 10 disjoint single-hop alternatives start->Ti, each a distinct
        // material so time and consumable vary independently.
        let mut breach_records = Vec::new();
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for i in 0..10 {
            let material = format!("mat{i}");
            breach_records.push(BreachRecord {
                material: material.clone(),
                breach_time_s: i as u32,
                consumable_lb: (9 - i) as u32,
                tool_weights: ToolWeights::ZERO,
            });
            nodes.push(NodeRecord {
                id: format!("T{i}"),
                material,
            });
            edges.push(EdgeRecord {
                from: "start".to_string(),
                to: format!("T{i}"),
                distance_ft: 0.0,
                delta_height_ft: 0.0,
            });
        }
        let catalog = BreachCatalog::from_records(breach_records);
        GraphStore::from_records(nodes, edges, &catalog).unwrap()
    }

    #[test]
    fn scenario_f_reducer_cap_keeps_pareto_extremes() {
        let store = ten_path_store();
        let mut paths = Vec::new();
        for i in 0..10u32 {
            let idx = store.index_of(&format!("T{i}").into()).unwrap();
            paths.push((Path::new(vec![store.start_index(), idx]), meta(i as i64, 9 - i)));
        }
        let entry = SegmentEntry { paths };
        let reduced = reduce(&entry, &store, 2, 2);
        assert!(reduced.paths.len() >= 2 && reduced.paths.len() <= 4);

        let times: Vec<i64> = reduced.paths.iter().map(|(_, m)| m.total_time_s).collect();
        assert!(times.contains(&0));
        assert!(times.contains(&1));

        let consums: Vec<u32> = reduced
            .paths
            .iter()
            .map(|(_, m)| m.total_consumable_lb)
            .collect();
        assert!(consums.contains(&9));
        assert!(consums.contains(&8));
    }

    #[test]
    fn zero_cutoff_means_no_limit() {
        let store = ten_path_store();
        let mut paths = Vec::new();
        for i in 0..10u32 {
            let idx = store.index_of(&format!("T{i}").into()).unwrap();
            paths.push((Path::new(vec![store.start_index(), idx]), meta(i as i64, 9 - i)));
        }
        let entry = SegmentEntry { paths };
        let reduced = reduce(&entry, &store, 0, 0);
        assert_eq!(reduced.paths.len(), 10);
    }
}
