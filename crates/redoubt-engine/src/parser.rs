//! Logic Parser / Mission Expander.
//!
//! A recursive-descent parser over the stated grammar, producing an AST in
//! one pass, then a single separate pass expanding that AST into missions
//! (Design Notes: the source instead repeatedly rewrites strings via
//! substring replacement; we don't).
//!
//! ```text
//! expr    := term ( ',' term )*             // OR
//! term    := factor ( ('+'|'_') factor )*   // AND (unordered or ordered)
//! factor  := NODE_ID | '(' expr ')'
//! ```

use std::collections::HashSet;

use redoubt_core::error::EngineError;
use redoubt_core::types::{Mission, NodeId, TargetSetExpression};

pub fn parse(input: &str) -> Result<TargetSetExpression, EngineError> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pos = 0;
    let expr = parse_expr(&chars, &mut pos)?;
    if pos != chars.len() {
        return Err(EngineError::Input(format!(
            "unexpected trailing input in target-set expression: {input}"
        )));
    }
    Ok(expr)
}

fn parse_expr(chars: &[char], pos: &mut usize) -> Result<TargetSetExpression, EngineError> {
    let mut terms = vec![parse_term(chars, pos)?];
    while peek(chars, *pos) == Some(',') {
        *pos += 1;
        terms.push(parse_term(chars, pos)?);
    }
    Ok(if terms.len() == 1 {
        terms.pop().unwrap()
    } else {
        TargetSetExpression::Or(terms)
    })
}

fn parse_term(chars: &[char], pos: &mut usize) -> Result<TargetSetExpression, EngineError> {
    let mut factors = vec![parse_factor(chars, pos)?];
    let mut op: Option<char> = None;

    loop {
        match peek(chars, *pos) {
            Some(c @ ('+' | '_')) => {
                match op {
                    None => op = Some(c),
                    Some(existing) if existing != c => {
                        return Err(EngineError::Input(format!(
                            "cannot mix '+' and '_' at the same precedence level without parentheses near position {}",
                            *pos
                        )));
                    }
                    _ => {}
                }
                *pos += 1;
                factors.push(parse_factor(chars, pos)?);
            }
            _ => break,
        }
    }

    Ok(if factors.len() == 1 {
        factors.pop().unwrap()
    } else {
        match op {
            Some('+') => TargetSetExpression::UnorderedAnd(factors),
            Some('_') => TargetSetExpression::OrderedAnd(factors),
            _ => unreachable!("multiple factors imply an operator was consumed"),
        }
    })
}

fn parse_factor(chars: &[char], pos: &mut usize) -> Result<TargetSetExpression, EngineError> {
    match peek(chars, *pos) {
        Some('(') => {
            *pos += 1;
            let expr = parse_expr(chars, pos)?;
            if peek(chars, *pos) != Some(')') {
                return Err(EngineError::Input(
                    "expected closing ')' in target-set expression".to_string(),
                ));
            }
            *pos += 1;
            Ok(expr)
        }
        Some(c) if is_leaf_char(c) => {
            let start = *pos;
            while matches!(peek(chars, *pos), Some(c) if is_leaf_char(c)) {
                *pos += 1;
            }
            let leaf: String = chars[start..*pos].iter().collect();
            Ok(TargetSetExpression::Leaf(NodeId::from(leaf)))
        }
        Some(c) => Err(EngineError::Input(format!(
            "unexpected character '{c}' in target-set expression"
        ))),
        None => Err(EngineError::Input(
            "unexpected end of target-set expression".to_string(),
        )),
    }
}

fn is_leaf_char(c: char) -> bool {
    !matches!(c, '+' | '_' | ',' | '(' | ')' | ':')
}

fn peek(chars: &[char], pos: usize) -> Option<char> {
    chars.get(pos).copied()
}

/// Expand an AST into the ordered waypoint sequences ("blocks") it denotes.
/// `Or` unions its children's alternatives; `OrderedAnd` takes the cartesian
/// product of its operands' alternatives, concatenated in fixed order;
/// `UnorderedAnd` additionally permutes the chosen operand blocks.
fn expand(expr: &TargetSetExpression) -> Vec<Vec<NodeId>> {
    match expr {
        TargetSetExpression::Leaf(id) => vec![vec![id.clone()]],
        TargetSetExpression::Or(children) => children.iter().flat_map(expand).collect(),
        TargetSetExpression::OrderedAnd(children) => {
            let alts: Vec<Vec<Vec<NodeId>>> = children.iter().map(expand).collect();
            cartesian(&alts)
                .into_iter()
                .map(|combo| combo.concat())
                .collect()
        }
        TargetSetExpression::UnorderedAnd(children) => {
            let alts: Vec<Vec<Vec<NodeId>>> = children.iter().map(expand).collect();
            cartesian(&alts)
                .into_iter()
                .flat_map(permutations)
                .collect()
        }
    }
}

fn cartesian(children_alts: &[Vec<Vec<NodeId>>]) -> Vec<Vec<Vec<NodeId>>> {
    let mut result: Vec<Vec<Vec<NodeId>>> = vec![Vec::new()];
    for alts in children_alts {
        let mut next = Vec::with_capacity(result.len() * alts.len());
        for combo in &result {
            for alt in alts {
                let mut extended = combo.clone();
                extended.push(alt.clone());
                next.push(extended);
            }
        }
        result = next;
    }
    result
}

/// All `k!` orderings of a fixed set of blocks, each flattened by
/// concatenating the blocks in that order.
fn permutations(blocks: Vec<Vec<NodeId>>) -> Vec<Vec<NodeId>> {
    let k = blocks.len();
    let mut indices: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    permute(&mut indices, 0, &blocks, &mut out);
    out
}

fn permute(indices: &mut [usize], start: usize, blocks: &[Vec<NodeId>], out: &mut Vec<Vec<NodeId>>) {
    if start == indices.len() {
        let mut flat = Vec::new();
        for &i in indices.iter() {
            flat.extend(blocks[i].clone());
        }
        out.push(flat);
        return;
    }
    for i in start..indices.len() {
        indices.swap(start, i);
        permute(indices, start + 1, blocks, out);
        indices.swap(start, i);
    }
}

/// Parse one target-set expression line and expand it into its
/// deduplicated, ordered set of missions.
pub fn missions_from_expression(expr: &TargetSetExpression) -> Vec<Mission> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for waypoints in expand(expr) {
        if seen.insert(waypoints.clone()) {
            out.push(Mission { waypoints });
        }
    }
    out
}

/// Parse and expand every non-blank, non-comment line of a logic file's
/// contents (`#` introduces a line comment) into the combined, deduplicated
/// mission list.
pub fn parse_logic_source(source: &str) -> Result<Vec<Mission>, EngineError> {
    let mut seen = HashSet::new();
    let mut missions = Vec::new();
    for line in source.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let expr = parse(line)?;
        for mission in missions_from_expression(&expr) {
            if seen.insert(mission.waypoints.clone()) {
                missions.push(mission);
            }
        }
    }
    Ok(missions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: &str) -> NodeId {
        NodeId::from(n)
    }

    #[test]
    fn scenario_d_ordered_and_single_mission_fixed_order() {
        let expr = parse("(A_B)").unwrap();
        let missions = missions_from_expression(&expr);
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].waypoints, vec![leaf("A"), leaf("B")]);
    }

    #[test]
    fn scenario_b_unordered_and_yields_both_permutations() {
        let expr = parse("(A+B)").unwrap();
        let mut missions = missions_from_expression(&expr);
        missions.sort_by_key(|m| m.waypoints.clone());
        assert_eq!(missions.len(), 2);
        assert_eq!(missions[0].waypoints, vec![leaf("A"), leaf("B")]);
        assert_eq!(missions[1].waypoints, vec![leaf("B"), leaf("A")]);
    }

    #[test]
    fn scenario_c_or_yields_one_mission_per_disjunct() {
        let expr = parse("(A,B)").unwrap();
        let missions = missions_from_expression(&expr);
        assert_eq!(missions.len(), 2);
    }

    #[test]
    fn three_way_unordered_and_yields_six_permutations() {
        let expr = parse("(A+B+C)").unwrap();
        let missions = missions_from_expression(&expr);
        assert_eq!(missions.len(), 6);
    }

    #[test]
    fn mixing_operators_without_parens_is_rejected() {
        assert!(parse("A+B_C").is_err());
    }

    #[test]
    fn mission_rendering_is_colon_joined_and_starts_at_start() {
        let expr = parse("(A_B)").unwrap();
        let mission = &missions_from_expression(&expr)[0];
        assert_eq!(mission.rendered(), "start:A:B");
    }

    #[test]
    fn logic_source_skips_comments_and_blank_lines() {
        let source = "# a comment\n\n(T1)\n(A,B)\n";
        let missions = parse_logic_source(source).unwrap();
        assert_eq!(missions.len(), 3);
    }

    #[test]
    fn duplicate_missions_across_lines_are_deduplicated() {
        let source = "(T1)\n(T1)\n";
        let missions = parse_logic_source(source).unwrap();
        assert_eq!(missions.len(), 1);
    }
}
