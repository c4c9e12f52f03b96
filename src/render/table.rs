//! Fixed-width tabular view of the hierarchy

use crate::hierarchy::{FolderTreeEntry, Forest};

/// ID, Display_Name, Type, Parent_ID
const COLUMN_WIDTHS: [usize; 4] = [30, 40, 10, 30];
const HEADERS: [&str; 4] = ["ID", "Display_Name", "Type", "Parent_ID"];

/// One flattened row: (id, display name, kind, parent display name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub display_name: String,
    pub kind: &'static str,
    pub parent: String,
}

impl Row {
    fn cells(&self) -> [&str; 4] {
        [&self.id, &self.display_name, self.kind, &self.parent]
    }
}

/// Flatten the forest: root projects, then a depth-first folder walk.
/// The parent column holds the parent folder's display name.
pub fn rows(forest: &Forest) -> Vec<Row> {
    let mut rows: Vec<Row> = forest
        .root_projects
        .iter()
        .map(|p| Row {
            id: p.id.clone(),
            display_name: p.display_name.clone(),
            kind: "Project",
            parent: String::new(),
        })
        .collect();

    for entry in forest.folders.values() {
        collect_folder(entry, "", &mut rows);
    }

    rows
}

fn collect_folder(entry: &FolderTreeEntry, parent: &str, rows: &mut Vec<Row>) {
    let folder = &entry.folder;
    rows.push(Row {
        id: folder.id.clone(),
        display_name: folder.display_name.clone(),
        kind: "Folder",
        parent: parent.to_string(),
    });

    for project in &entry.projects {
        rows.push(Row {
            id: project.id.clone(),
            display_name: project.display_name.clone(),
            kind: "Project",
            parent: folder.display_name.clone(),
        });
    }

    for sub in entry.subfolders.values() {
        collect_folder(sub, &folder.display_name, rows);
    }
}

fn format_line(cells: [&str; 4]) -> String {
    let [id, name, kind, parent] = cells;
    let [w0, w1, w2, w3] = COLUMN_WIDTHS;
    format!(
        "{:<w0$} {:<w1$} {:<w2$} {:<w3$}",
        id, name, kind, parent,
        w0 = w0, w1 = w1, w2 = w2, w3 = w3
    )
}

/// Header, separator rule, then rows sorted by (id, display name)
pub fn render(forest: &Forest) -> String {
    let rule_len = COLUMN_WIDTHS.iter().sum::<usize>() + COLUMN_WIDTHS.len() * 2;
    let mut lines = vec![format_line(HEADERS), "-".repeat(rule_len)];

    if forest.is_empty() {
        lines.push("No data to display in tabular format.".to_string());
        return lines.join("\n");
    }

    let mut rows = rows(forest);

    rows.sort_by(|a, b| (&a.id, &a.display_name).cmp(&(&b.id, &b.display_name)));
    lines.extend(rows.iter().map(|row| format_line(row.cells())));

    lines.join("\n")
}
