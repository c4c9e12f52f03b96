//! Hierarchy Builder
//!
//! Reconstructs the folder/project tree under a queried scope from a flat,
//! unordered set of container records. Each record only knows its direct
//! parent, so children are indexed by parent folder id once and the tree is
//! then grown downwards from the folders sitting directly under the scope.
//!
//! Records whose parent never becomes reachable from the scope (a folder
//! outside the caller's visibility, a cycle, a malformed parent string) are
//! left out of the forest and only show up in [`OrphanCounts`].

use crate::asset::record::{ContainerNode, NodeKind};
use crate::asset::scope::Scope;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Parent type used by nested folders and projects
const FOLDERS: &str = "folders";

/// One folder plus everything attached directly beneath it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderTreeEntry {
    pub folder: ContainerNode,
    pub projects: Vec<ContainerNode>,
    pub subfolders: BTreeMap<String, FolderTreeEntry>,
}

impl FolderTreeEntry {
    fn new(folder: ContainerNode) -> Self {
        Self {
            folder,
            projects: Vec::new(),
            subfolders: BTreeMap::new(),
        }
    }

    /// Depth-first walk over this entry and all nested subfolders
    #[cfg(test)]
    pub(crate) fn walk(&self) -> Vec<&FolderTreeEntry> {
        let mut out = vec![self];
        for sub in self.subfolders.values() {
            out.extend(sub.walk());
        }
        out
    }
}

/// Records that could not be placed in the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrphanCounts {
    pub folders: usize,
    pub projects: usize,
}

impl OrphanCounts {
    pub fn total(&self) -> usize {
        self.folders + self.projects
    }
}

/// Builder output: root projects plus the folder tree under the scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Forest {
    #[serde(rename = "organization_projects")]
    pub root_projects: Vec<ContainerNode>,
    pub folders: BTreeMap<String, FolderTreeEntry>,
    #[serde(skip)]
    pub orphans: OrphanCounts,
}

impl Forest {
    pub fn is_empty(&self) -> bool {
        self.root_projects.is_empty() && self.folders.is_empty()
    }

    /// Every folder entry in the forest, depth-first
    #[cfg(test)]
    pub(crate) fn all_folders(&self) -> Vec<&FolderTreeEntry> {
        self.folders.values().flat_map(|entry| entry.walk()).collect()
    }
}

/// Folder and project records, each list in record order. Visiting siblings
/// in this order makes duplicate folder ids resolve the same way for every
/// permutation of the input.
struct Records<'a> {
    folders: Vec<&'a ContainerNode>,
    projects: Vec<&'a ContainerNode>,
}

impl<'a> Records<'a> {
    fn partition(nodes: &'a [ContainerNode]) -> Self {
        let mut folders = Vec::new();
        let mut projects = Vec::new();
        for node in nodes {
            match node.kind() {
                NodeKind::Folder => folders.push(node),
                NodeKind::Project => projects.push(node),
                NodeKind::Other => {}
            }
        }
        folders.sort();
        projects.sort();
        Self { folders, projects }
    }
}

/// Positions of the children of each folder id, looked up while growing the tree
struct ChildIndex<'a> {
    subfolders: HashMap<&'a str, Vec<usize>>,
    projects: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ChildIndex<'a> {
    fn new(records: &Records<'a>) -> Self {
        Self {
            subfolders: group_by_parent_folder(&records.folders),
            projects: group_by_parent_folder(&records.projects),
        }
    }

    fn subfolders_of(&self, folder: &ContainerNode) -> &[usize] {
        self.subfolders
            .get(folder.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn projects_of(&self, folder: &ContainerNode) -> &[usize] {
        self.projects
            .get(folder.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn group_by_parent_folder<'a>(nodes: &[&'a ContainerNode]) -> HashMap<&'a str, Vec<usize>> {
    let mut index: HashMap<&'a str, Vec<usize>> = HashMap::new();
    for (position, &node) in nodes.iter().enumerate() {
        if node.parent_type == FOLDERS {
            index.entry(node.parent_id.as_str()).or_default().push(position);
        }
    }
    index
}

/// Which records ended up in the forest
struct Placement<'a> {
    folder_ids: HashSet<&'a str>,
    folders: Vec<bool>,
    projects: Vec<bool>,
}

impl<'a> Placement<'a> {
    fn new(records: &Records<'a>) -> Self {
        Self {
            folder_ids: HashSet::new(),
            folders: vec![false; records.folders.len()],
            projects: vec![false; records.projects.len()],
        }
    }

    /// Place folder record `position` unless a record with its id already is.
    /// Refusing repeated ids also cuts cycles.
    fn place_folder(&mut self, position: usize, folder: &'a ContainerNode) -> bool {
        if !self.folder_ids.insert(folder.id.as_str()) {
            return false;
        }
        self.folders[position] = true;
        true
    }

    fn orphans(&self) -> OrphanCounts {
        OrphanCounts {
            folders: self.folders.iter().filter(|placed| !**placed).count(),
            projects: self.projects.iter().filter(|placed| !**placed).count(),
        }
    }
}

/// Build the forest for `scope`. Never fails; unknown asset types are ignored.
pub fn build(nodes: &[ContainerNode], scope: &Scope) -> Forest {
    build_for_parent(nodes, &scope.parent_type, &scope.parent_id)
}

/// Same as [`build`] with the scope given as its two parts.
///
/// When several folder records share an id, the first one reached wins and
/// the rest count as orphans. Roots and siblings are visited in record order
/// (id, full name, display name, asset type, parent).
pub fn build_for_parent(nodes: &[ContainerNode], parent_type: &str, parent_id: &str) -> Forest {
    let records = Records::partition(nodes);
    let index = ChildIndex::new(&records);
    let mut placement = Placement::new(&records);

    let mut root_projects = Vec::new();
    for (position, project) in records.projects.iter().enumerate() {
        if project.is_child_of(parent_type, parent_id) {
            placement.projects[position] = true;
            root_projects.push((*project).clone());
        }
    }

    let mut tree = BTreeMap::new();
    for (position, &folder) in records.folders.iter().enumerate() {
        if folder.is_child_of(parent_type, parent_id) && placement.place_folder(position, folder) {
            let entry = attach(position, &records, &index, &mut placement);
            tree.insert(folder.id.clone(), entry);
        }
    }

    let orphans = placement.orphans();
    if orphans.total() > 0 {
        tracing::warn!(
            "{} folder(s) and {} project(s) have a parent outside the fetched set",
            orphans.folders,
            orphans.projects
        );
    }

    Forest {
        root_projects,
        folders: tree,
        orphans,
    }
}

/// Wrap folder record `position` and recursively attach its children
fn attach<'a>(
    position: usize,
    records: &Records<'a>,
    index: &ChildIndex<'a>,
    placement: &mut Placement<'a>,
) -> FolderTreeEntry {
    let folder = records.folders[position];
    let mut entry = FolderTreeEntry::new(folder.clone());

    for &project in index.projects_of(folder) {
        placement.projects[project] = true;
        entry.projects.push(records.projects[project].clone());
    }

    for &child in index.subfolders_of(folder) {
        let child_folder = records.folders[child];
        if placement.place_folder(child, child_folder) {
            entry
                .subfolders
                .insert(child_folder.id.clone(), attach(child, records, index, placement));
        }
    }

    entry
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::asset::record::{FOLDER_TYPE, PROJECT_TYPE};

    pub(crate) fn node(asset_type: &str, id: &str, display: &str, parent: &str) -> ContainerNode {
        let (parent_type, parent_id) = parent.split_once('/').unwrap_or(("", ""));
        ContainerNode {
            id: id.to_string(),
            name: format!("//cloudresourcemanager.googleapis.com/x/{}", id),
            display_name: display.to_string(),
            asset_type: asset_type.to_string(),
            parent_type: parent_type.to_string(),
            parent_id: parent_id.to_string(),
        }
    }

    pub(crate) fn folder(id: &str, parent: &str) -> ContainerNode {
        node(FOLDER_TYPE, id, id, parent)
    }

    pub(crate) fn project(id: &str, parent: &str) -> ContainerNode {
        node(PROJECT_TYPE, id, id, parent)
    }

    /// A, B under A, P1 under B, P2 at the root
    pub(crate) fn sample_nodes() -> Vec<ContainerNode> {
        vec![
            project("P1", "folders/B"),
            folder("B", "folders/A"),
            project("P2", "organizations/1"),
            folder("A", "organizations/1"),
        ]
    }

    fn scope() -> Scope {
        "organizations/1".parse().unwrap()
    }

    #[test]
    fn test_build_nested_structure() {
        let forest = build(&sample_nodes(), &scope());

        assert_eq!(forest.root_projects.len(), 1);
        assert_eq!(forest.root_projects[0].id, "P2");

        let a = &forest.folders["A"];
        assert!(a.projects.is_empty());
        let b = &a.subfolders["B"];
        assert_eq!(b.projects.len(), 1);
        assert_eq!(b.projects[0].id, "P1");
        assert_eq!(forest.orphans, OrphanCounts::default());
    }

    #[test]
    fn test_build_empty_input() {
        let forest = build(&[], &scope());
        assert!(forest.is_empty());
        assert_eq!(forest.orphans.total(), 0);
    }

    #[test]
    fn test_orphan_folder_and_project_are_dropped() {
        let mut nodes = sample_nodes();
        nodes.push(folder("Z", "folders/missing"));
        nodes.push(project("PZ", "folders/Z"));
        nodes.push(project("PX", "folders/missing"));

        let forest = build(&nodes, &scope());
        let ids: Vec<&str> = forest.all_folders().iter().map(|f| f.folder.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(forest.orphans, OrphanCounts { folders: 1, projects: 2 });
    }

    #[test]
    fn test_cycle_does_not_hang() {
        let nodes = vec![
            folder("A", "organizations/1"),
            folder("B", "folders/A"),
            folder("C", "folders/B"),
            // Duplicate record for A claiming C as its parent
            folder("A", "folders/C"),
            folder("X", "folders/Y"),
            folder("Y", "folders/X"),
        ];
        let forest = build(&nodes, &scope());
        assert_eq!(forest.all_folders().len(), 3);
        // The second A record, X and Y
        assert_eq!(forest.orphans.folders, 3);
    }

    #[test]
    fn test_duplicate_folder_record_counts_as_orphan() {
        let nodes = vec![
            folder("A", "organizations/1"),
            node(FOLDER_TYPE, "A", "A2", "folders/missing"),
            project("P", "folders/A"),
        ];
        let forest = build(&nodes, &scope());

        assert_eq!(forest.folders["A"].folder.display_name, "A");
        assert_eq!(forest.folders["A"].projects[0].id, "P");
        assert_eq!(forest.orphans, OrphanCounts { folders: 1, projects: 0 });
    }

    #[test]
    fn test_duplicate_folder_id_resolves_independent_of_order() {
        let nodes = vec![
            node(FOLDER_TYPE, "A", "Second", "organizations/1"),
            node(FOLDER_TYPE, "A", "First", "organizations/1"),
            project("P", "folders/A"),
        ];
        let mut reversed = nodes.clone();
        reversed.reverse();

        let forest = build(&nodes, &scope());
        assert_eq!(forest, build(&reversed, &scope()));
        assert_eq!(forest.folders["A"].folder.display_name, "First");
        assert_eq!(forest.orphans.folders, 1);
    }

    #[test]
    fn test_folder_scope() {
        let nodes = vec![
            folder("F1", "folders/10"),
            project("P1", "folders/10"),
            project("P2", "folders/F1"),
            folder("F0", "organizations/1"),
        ];
        let scope: Scope = "folders/10".parse().unwrap();
        let forest = build(&nodes, &scope);
        assert_eq!(forest.root_projects[0].id, "P1");
        assert_eq!(forest.folders["F1"].projects[0].id, "P2");
        assert!(!forest.folders.contains_key("F0"));
        assert_eq!(forest.orphans, OrphanCounts { folders: 1, projects: 0 });
    }

    #[test]
    fn test_other_asset_types_are_ignored() {
        let mut nodes = sample_nodes();
        nodes.push(node(
            "cloudresourcemanager.googleapis.com/Organization",
            "1",
            "org",
            "",
        ));
        let forest = build(&nodes, &scope());
        assert_eq!(forest, build(&sample_nodes(), &scope()));
    }

    #[test]
    fn test_permutation_yields_same_forest() {
        let nodes = sample_nodes();
        let mut reversed = nodes.clone();
        reversed.reverse();
        assert_eq!(build(&nodes, &scope()), build(&reversed, &scope()));
    }

    #[test]
    fn test_json_shape() {
        let forest = build(&sample_nodes(), &scope());
        let value = serde_json::to_value(&forest).unwrap();
        assert_eq!(value["organization_projects"][0]["id"], "P2");
        assert_eq!(
            value["folders"]["A"]["subfolders"]["B"]["projects"][0]["id"],
            "P1"
        );
        assert!(value.get("orphans").is_none());
    }
}
