//! Segment Cache: persistent memo keyed by `(from,to)`, crash-safe via
//! write-temp-then-rename.
//!
//! Each key maps to two artifacts under the cache directory: a paths
//! listing (`Paths_<from>_<to>.txt`, one canonical path per line) and path
//! metadata (`PathData_<from>_<to>.txt`, one cost line per path). Both are
//! written to a `working_*` temporary name, flushed, then atomically
//! renamed into place; on startup any leftover `working_*` file is a
//! partial write from an interrupted run and is discarded.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path as FsPath, PathBuf};

use redoubt_core::types::{Path, PathMetadata, SegmentEntry, SegmentKey, ToolWeights, TOOL_SLOTS};
use redoubt_graph::GraphStore;

pub struct SegmentCache {
    dir: PathBuf,
}

impl SegmentCache {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Delete any `working_*` artifacts left behind by an interrupted run.
    /// Call once at startup before any `get`/`put`.
    pub fn discard_partial_writes(&self) -> io::Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with("working_") {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    /// `None` means "not yet evaluated"; `Some(entry)` with an empty path
    /// list means "evaluated, no admissible path".
    pub fn get(&self, key: &SegmentKey, store: &GraphStore) -> io::Result<Option<SegmentEntry>> {
        let pathdata_path = self.dir.join(pathdata_filename(key));
        if !pathdata_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&pathdata_path)?;
        let mut paths = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(parsed) = parse_pathdata_line(line, store) {
                paths.push(parsed);
            }
        }
        Ok(Some(SegmentEntry { paths }))
    }

    pub fn put(&self, key: &SegmentKey, entry: &SegmentEntry, store: &GraphStore) -> io::Result<()> {
        self.write_artifact(&paths_filename(key), &render_paths(entry, store))?;
        self.write_artifact(&pathdata_filename(key), &render_pathdata(entry, store))?;
        Ok(())
    }

    fn write_artifact(&self, final_name: &str, content: &str) -> io::Result<()> {
        let working_name = format!("working_{final_name}");
        let working_path = self.dir.join(&working_name);
        let final_path = self.dir.join(final_name);

        let mut file = File::create(&working_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&working_path, &final_path)
    }

    pub fn dir(&self) -> &FsPath {
        &self.dir
    }
}

fn paths_filename(key: &SegmentKey) -> String {
    format!("Paths_{}_{}.txt", key.from, key.to)
}

fn pathdata_filename(key: &SegmentKey) -> String {
    format!("PathData_{}_{}.txt", key.from, key.to)
}

fn render_paths(entry: &SegmentEntry, store: &GraphStore) -> String {
    entry
        .paths
        .iter()
        .map(|(path, _)| path.canonical(|idx| store.id_of(idx).0.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_pathdata(entry: &SegmentEntry, store: &GraphStore) -> String {
    entry
        .paths
        .iter()
        .map(|(path, meta)| render_pathdata_line(path, meta, store))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_pathdata_line(path: &Path, meta: &PathMetadata, store: &GraphStore) -> String {
    let canonical = path.canonical(|idx| store.id_of(idx).0.clone());
    let tools = meta
        .tool_weights
        .0
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{canonical}|{}|{}|{}|{tools}",
        meta.total_time_s, meta.total_consumable_lb, meta.total_weight_lb
    )
}

fn parse_pathdata_line(line: &str, store: &GraphStore) -> Option<(Path, PathMetadata)> {
    let mut fields = line.splitn(5, '|');
    let canonical = fields.next()?;
    let time: i64 = fields.next()?.parse().ok()?;
    let consum: u32 = fields.next()?.parse().ok()?;
    let weight: u32 = fields.next()?.parse().ok()?;
    let tools_field = fields.next()?;

    let mut tool_weights = [0u32; TOOL_SLOTS];
    for (slot, value) in tools_field.split(',').enumerate().take(TOOL_SLOTS) {
        tool_weights[slot] = value.parse().ok()?;
    }

    let mut indices = Vec::new();
    for name in canonical.split('-') {
        indices.push(store.index_of(&name.into())?);
    }

    Some((
        Path::new(indices),
        PathMetadata {
            total_time_s: time,
            total_consumable_lb: consum,
            total_weight_lb: weight,
            tool_weights: ToolWeights(tool_weights),
        },
    ))
}
