//! Thin, un-opinionated readers for the plain-text input files: edge table,
//! node table, breach table, and logic file. This is the "external
//! collaborator" the core engine never touches directly — it only ever
//! consumes the typed records produced here.

use std::fs;
use std::path::Path;

use redoubt_core::types::{ToolWeights, TOOL_SLOTS};
use redoubt_graph::{BreachRecord, EdgeRecord, NodeRecord};

use crate::error::{PathfindError, Result};

fn non_comment_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().filter_map(|line| {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    })
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PathfindError::InputFile {
        path: path.display().to_string(),
        source,
    })
}

fn malformed(path: &Path, line: &str, reason: &str) -> PathfindError {
    PathfindError::MalformedRow {
        path: path.display().to_string(),
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

/// `from_node,to_node,distance_ft,delta_height_ft` per line.
pub fn load_edges(path: &Path) -> Result<Vec<EdgeRecord>> {
    let content = read_to_string(path)?;
    let mut edges = Vec::new();
    for line in non_comment_lines(&content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(malformed(path, line, "expected 4 comma-separated fields"));
        }
        edges.push(EdgeRecord {
            from: fields[0].to_string(),
            to: fields[1].to_string(),
            distance_ft: fields[2]
                .parse()
                .map_err(|_| malformed(path, line, "distance_ft is not a number"))?,
            delta_height_ft: fields[3]
                .parse()
                .map_err(|_| malformed(path, line, "delta_height_ft is not a number"))?,
        });
    }
    Ok(edges)
}

/// `node_id,description,material,<ignored...>` per line. Only the id and
/// material columns are modeled; anything after them is ignored.
pub fn load_nodes(path: &Path) -> Result<Vec<NodeRecord>> {
    let content = read_to_string(path)?;
    let mut nodes = Vec::new();
    for line in non_comment_lines(&content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            return Err(malformed(path, line, "expected at least node_id,description,material"));
        }
        nodes.push(NodeRecord {
            id: fields[0].to_string(),
            material: fields[2].to_string(),
        });
    }
    Ok(nodes)
}

/// `material,breach_time_s,consumable_lb,tool0_lb,...,tool19_lb` per line.
pub fn load_breach_table(path: &Path) -> Result<Vec<BreachRecord>> {
    let content = read_to_string(path)?;
    let mut records = Vec::new();
    for line in non_comment_lines(&content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 + TOOL_SLOTS {
            return Err(malformed(
                path,
                line,
                "expected material,breach_time_s,consumable_lb,<20 tool weights>",
            ));
        }
        let mut tools = [0u32; TOOL_SLOTS];
        for (slot, value) in fields[3..].iter().enumerate() {
            tools[slot] = value
                .parse()
                .map_err(|_| malformed(path, line, "tool weight is not a non-negative integer"))?;
        }
        records.push(BreachRecord {
            material: fields[0].to_string(),
            breach_time_s: fields[1]
                .parse()
                .map_err(|_| malformed(path, line, "breach_time_s is not a non-negative integer"))?,
            consumable_lb: fields[2]
                .parse()
                .map_err(|_| malformed(path, line, "consumable_lb is not a non-negative integer"))?,
            tool_weights: ToolWeights(tools),
        });
    }
    Ok(records)
}

/// Raw contents of the logic file; expansion into missions happens in
/// `redoubt_engine::parse_logic_source`.
pub fn read_logic_file(path: &Path) -> Result<String> {
    read_to_string(path)
}
