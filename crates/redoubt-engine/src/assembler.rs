//! Mission Assembler: cartesian combination of per-leg reduced path sets
//! into whole assembled routes, with incremental budget checking.

use redoubt_core::types::{Budgets, PathMetadata, SegmentEntry};

/// One fully assembled route: a concatenation of leg paths with duplicated
/// junction nodes elided, and its accumulated metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPath {
    pub nodes: Vec<u32>,
    pub metadata: PathMetadata,
}

#[derive(Debug, Default)]
pub struct AssemblyOutcome {
    pub valid: Vec<AssembledPath>,
    pub invalid: Vec<AssembledPath>,
}

/// Concatenate `p` then `q`, eliding the duplicated junction node. Charges
/// both legs' consumable totals in full: the junction node's breach cost
/// was already counted once by each leg's own enumeration, so this slightly
/// over-counts at the seam. That inflation is tolerated, matching how the
/// source this engine reproduces reports costs, and must not be "fixed" by
/// deducting it here.
fn combine(p: &AssembledPath, q: &AssembledPath) -> AssembledPath {
    debug_assert_eq!(
        p.nodes.last(),
        q.nodes.first(),
        "legs must share a junction node to combine"
    );
    let mut nodes = p.nodes.clone();
    nodes.extend_from_slice(&q.nodes[1..]);

    let tool_weights = p.metadata.tool_weights.elementwise_max(&q.metadata.tool_weights);
    let total_consumable_lb = p.metadata.total_consumable_lb + q.metadata.total_consumable_lb;
    let total_weight_lb = total_consumable_lb + tool_weights.sum();

    AssembledPath {
        nodes,
        metadata: PathMetadata {
            total_time_s: p.metadata.total_time_s + q.metadata.total_time_s,
            total_consumable_lb,
            total_weight_lb,
            tool_weights,
        },
    }
}

/// Assemble one mission's legs (already reduced, in leg order: leg 0 is
/// `(start,w1)`, the last is `(w_{k-1},w_k)`) into its valid and invalid
/// assembled paths. A leg with an empty path set yields an empty outcome
/// for the whole mission without error: "no admissible paths for that leg".
///
/// Combination proceeds right-to-left: the last two legs are merged first,
/// the result becomes the new rightmost partial, and so on leftward. This
/// matches the reference traversal order and keeps output deterministic.
pub fn assemble_mission(legs: &[SegmentEntry], budgets: &Budgets) -> AssemblyOutcome {
    assert!(!legs.is_empty(), "a mission always has at least one leg");

    let mut invalid = Vec::new();

    let mut partials: Vec<AssembledPath> = legs
        .last()
        .unwrap()
        .paths
        .iter()
        .filter_map(|(path, meta)| {
            let assembled = AssembledPath {
                nodes: path.nodes.clone(),
                metadata: *meta,
            };
            if assembled.metadata.within_budgets(budgets) {
                Some(assembled)
            } else {
                invalid.push(assembled);
                None
            }
        })
        .collect();

    for leg in legs[..legs.len() - 1].iter().rev() {
        let mut next = Vec::new();
        for (path, meta) in &leg.paths {
            let left = AssembledPath {
                nodes: path.nodes.clone(),
                metadata: *meta,
            };
            for right in &partials {
                let combined = combine(&left, right);
                if combined.metadata.within_budgets(budgets) {
                    next.push(combined);
                } else {
                    invalid.push(combined);
                }
            }
        }
        partials = next;
    }

    AssemblyOutcome {
        valid: partials,
        invalid,
    }
}

/// Render one valid assembled path as `<counter> [ttttt,ccc,www] <tools> <path>`.
pub fn render_line(counter: usize, assembled: &AssembledPath, resolve: impl Fn(u32) -> String) -> String {
    let canonical = assembled
        .nodes
        .iter()
        .map(|&idx| resolve(idx))
        .collect::<Vec<_>>()
        .join("-");
    let tools = assembled
        .metadata
        .tool_weights
        .0
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{counter:06} [{:05},{:03},{:03}] {tools} {canonical}",
        assembled.metadata.total_time_s, assembled.metadata.total_consumable_lb, assembled.metadata.total_weight_lb,
    )
}
