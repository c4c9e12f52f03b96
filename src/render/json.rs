//! Structured JSON document

use crate::hierarchy::Forest;

/// `{"organization_projects": [...], "folders": {id: {folder, projects, subfolders}}}`,
/// pretty-printed with 2-space indentation. Folder maps are keyed by id in
/// ascending order so output diffs cleanly between runs.
pub fn render(forest: &Forest) -> serde_json::Result<String> {
    serde_json::to_string_pretty(forest)
}
