//! Indented plain-text tree

use crate::asset::record::ContainerNode;
use crate::hierarchy::{FolderTreeEntry, Forest};

/// Root projects first, then folders depth-first. Siblings are ordered by
/// display name (case-sensitive, stable).
pub fn render(forest: &Forest) -> String {
    let mut lines = Vec::new();

    for project in sorted_projects(&forest.root_projects) {
        lines.push(project_line("", project));
    }

    for entry in sorted_folders(forest.folders.values()) {
        render_folder(entry, 0, &mut lines);
    }

    lines.join("\n")
}

fn render_folder(entry: &FolderTreeEntry, level: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(level);
    lines.push(format!(
        "{}[{}] ({})",
        indent, entry.folder.display_name, entry.folder.id
    ));

    let project_indent = format!("{}  ", indent);
    for project in sorted_projects(&entry.projects) {
        lines.push(project_line(&project_indent, project));
    }

    for sub in sorted_folders(entry.subfolders.values()) {
        render_folder(sub, level + 1, lines);
    }
}

fn project_line(indent: &str, project: &ContainerNode) -> String {
    format!("{}- {} ({})", indent, project.display_name, project.id)
}

fn sorted_projects(projects: &[ContainerNode]) -> Vec<&ContainerNode> {
    let mut sorted: Vec<&ContainerNode> = projects.iter().collect();
    sorted.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    sorted
}

fn sorted_folders<'a>(
    entries: impl Iterator<Item = &'a FolderTreeEntry>,
) -> Vec<&'a FolderTreeEntry> {
    let mut sorted: Vec<&FolderTreeEntry> = entries.collect();
    sorted.sort_by(|a, b| a.folder.display_name.cmp(&b.folder.display_name));
    sorted
}
