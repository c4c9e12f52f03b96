//! Unicode box-drawing tree
//!
//! ```text
//! Scope: organizations/123
//! ├── 📄 Shared (shared-prj)
//! └── 📁 Engineering (456)
//!     ├── 📄 Backend (backend-prj)
//!     └── 📁 Sandbox (789)
//! ```

use crate::asset::record::ContainerNode;
use crate::hierarchy::{FolderTreeEntry, Forest};
use std::collections::BTreeMap;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

const PROJECT_MARKER: &str = "📄";
const FOLDER_MARKER: &str = "📁";

pub fn render(forest: &Forest, scope: &str) -> String {
    let mut lines = vec![format!("Scope: {}", scope)];
    render_level(&forest.root_projects, &forest.folders, "", &mut lines);
    lines.join("\n")
}

/// Projects first, then folders, each sorted case-insensitively by display name
fn render_level(
    projects: &[ContainerNode],
    folders: &BTreeMap<String, FolderTreeEntry>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let mut projects: Vec<&ContainerNode> = projects.iter().collect();
    projects.sort_by_cached_key(|p| p.display_name.to_lowercase());

    let mut folders: Vec<&FolderTreeEntry> = folders.values().collect();
    folders.sort_by_cached_key(|f| f.folder.display_name.to_lowercase());

    for (i, project) in projects.iter().enumerate() {
        let is_last = i + 1 == projects.len() && folders.is_empty();
        lines.push(format!(
            "{}{}{} {} ({})",
            prefix,
            connector(is_last),
            PROJECT_MARKER,
            project.display_name,
            project.id
        ));
    }

    for (i, entry) in folders.iter().enumerate() {
        let is_last = i + 1 == folders.len();
        lines.push(format!(
            "{}{}{} {} ({})",
            prefix,
            connector(is_last),
            FOLDER_MARKER,
            entry.folder.display_name,
            entry.folder.id
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
        render_level(&entry.projects, &entry.subfolders, &child_prefix, lines);
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        LAST_BRANCH
    } else {
        BRANCH
    }
}
