//! Numeric semantics shared by the enumerator and the mission assembler:
//! the travel-time formula and per-edge metadata accumulation.

use redoubt_core::types::{BreachProfile, Budgets, DirectedEdge, PathMetadata};

/// `floor(distance / adv_speed + vertical_surcharge + 0.051)`, where the
/// vertical surcharge uses the ascend coefficient for a rise and the
/// descend coefficient (applied with the edge's sign) for a drop. The
/// `+0.051` term and the descent sign match the reference implementation
/// literally; see the open question on descent fatigue in the design notes.
pub fn travel_time_s(edge: DirectedEdge, budgets: &Budgets) -> i64 {
    let vertical_surcharge = if edge.delta_height_ft > 0.0 {
        edge.delta_height_ft * budgets.ascend_fatigue_s_per_ft
    } else {
        edge.delta_height_ft * budgets.descend_fatigue_s_per_ft
    };
    ((edge.distance_ft / budgets.adv_speed_ft_per_s) + vertical_surcharge + 0.051).floor() as i64
}

/// Extend `meta` by traversing `edge` and breaching the node at its far
/// end for the first time. Every node in a simple path is visited exactly
/// once, so breach cost is always charged here — "first visit" bookkeeping
/// lives at the caller, which never calls this twice for the same node
/// within one path.
pub fn extend(
    meta: &PathMetadata,
    edge: DirectedEdge,
    breach: BreachProfile,
    budgets: &Budgets,
) -> PathMetadata {
    let travel = travel_time_s(edge, budgets);
    let tool_weights = meta.tool_weights.elementwise_max(&breach.tool_weights);
    let total_consumable = meta.total_consumable_lb + breach.consumable_weight_lb;
    let total_weight = total_consumable + tool_weights.sum();
    PathMetadata {
        total_time_s: meta.total_time_s + travel + breach.breach_time_s as i64,
        total_consumable_lb: total_consumable,
        total_weight_lb: total_weight,
        tool_weights,
    }
}
