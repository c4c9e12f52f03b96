//! Asset records
//!
//! `RawAsset` is the typed shape of one `searchAllResources` result. Everything
//! past the ingestion boundary works on `ContainerNode` or `ResourceRecord`.

use serde::{Deserialize, Serialize};

/// Prefix the API puts in front of Resource Manager parent names
pub const RESOURCE_MANAGER_PREFIX: &str = "//cloudresourcemanager.googleapis.com/";

pub const ORGANIZATION_TYPE: &str = "cloudresourcemanager.googleapis.com/Organization";
pub const FOLDER_TYPE: &str = "cloudresourcemanager.googleapis.com/Folder";
pub const PROJECT_TYPE: &str = "cloudresourcemanager.googleapis.com/Project";

/// Asset types fetched when building the hierarchy
pub const CONTAINER_TYPES: &[&str] = &[ORGANIZATION_TYPE, FOLDER_TYPE, PROJECT_TYPE];

/// One search result as returned by the Cloud Asset API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAsset {
    pub name: String,
    pub asset_type: String,
    pub project: String,
    pub display_name: String,
    pub location: String,
    pub parent_full_resource_name: String,
}

/// Structural role of a container record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    Project,
    Other,
}

/// Canonical descriptor of one organizational container.
/// Ordered field by field, starting with `id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ContainerNode {
    pub id: String,
    /// Full resource name as returned by the source
    pub name: String,
    pub display_name: String,
    pub asset_type: String,
    #[serde(rename = "parent_id_type")]
    pub parent_type: String,
    #[serde(rename = "parent_id_value")]
    pub parent_id: String,
}

impl ContainerNode {
    /// Normalize a raw record. Never fails; malformed input yields empty fields.
    pub fn from_raw(raw: &RawAsset) -> Self {
        let (parent_type, parent_id) = split_parent(&raw.parent_full_resource_name);
        Self {
            id: last_segment(&raw.name).to_string(),
            name: raw.name.clone(),
            display_name: raw.display_name.clone(),
            asset_type: raw.asset_type.clone(),
            parent_type,
            parent_id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        if self.asset_type.ends_with("/Folder") {
            NodeKind::Folder
        } else if self.asset_type.ends_with("/Project") {
            NodeKind::Project
        } else {
            NodeKind::Other
        }
    }

    /// Whether this node's declared parent is exactly `(parent_type, parent_id)`
    pub fn is_child_of(&self, parent_type: &str, parent_id: &str) -> bool {
        self.parent_type == parent_type && self.parent_id == parent_id
    }
}

/// Substring after the last `/`, or the whole string when there is none
pub fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Split `//cloudresourcemanager.googleapis.com/folders/123` into `("folders", "123")`.
/// The prefix is optional; a string without `/` yields two empty parts.
pub fn split_parent(parent: &str) -> (String, String) {
    let trimmed = parent.replace(RESOURCE_MANAGER_PREFIX, "");
    match trimmed.split_once('/') {
        Some((kind, id)) => (kind.to_string(), id.to_string()),
        None => (String::new(), String::new()),
    }
}

/// Flat-list view of a non-container resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    pub name: String,
    pub asset_type: String,
    pub project: String,
    pub display_name: String,
    pub location: String,
    pub parent_full_resource_name: String,
}

impl ResourceRecord {
    /// Bare resource name (last path segment)
    pub fn short_name(&self) -> &str {
        last_segment(&self.name)
    }

    /// Project ID, only when the direct parent is a project
    pub fn parent_project_id(&self) -> &str {
        let project_prefix = format!("{}projects/", RESOURCE_MANAGER_PREFIX);
        if self.parent_full_resource_name.starts_with(&project_prefix) {
            last_segment(&self.parent_full_resource_name)
        } else {
            ""
        }
    }
}

impl From<RawAsset> for ResourceRecord {
    fn from(raw: RawAsset) -> Self {
        Self {
            name: raw.name,
            asset_type: raw.asset_type,
            project: raw.project,
            display_name: raw.display_name,
            location: raw.location,
            parent_full_resource_name: raw.parent_full_resource_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, asset_type: &str, parent: &str) -> RawAsset {
        RawAsset {
            name: name.to_string(),
            asset_type: asset_type.to_string(),
            display_name: "Display".to_string(),
            parent_full_resource_name: parent.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_folder_with_prefixed_parent() {
        let node = ContainerNode::from_raw(&raw(
            "//cloudresourcemanager.googleapis.com/folders/222",
            FOLDER_TYPE,
            "//cloudresourcemanager.googleapis.com/organizations/111",
        ));
        assert_eq!(node.id, "222");
        assert_eq!(node.parent_type, "organizations");
        assert_eq!(node.parent_id, "111");
        assert_eq!(node.kind(), NodeKind::Folder);
        assert!(node.is_child_of("organizations", "111"));
    }

    #[test]
    fn test_normalize_unprefixed_parent() {
        let node = ContainerNode::from_raw(&raw("projects/p1", PROJECT_TYPE, "folders/9"));
        assert_eq!(node.id, "p1");
        assert_eq!((node.parent_type.as_str(), node.parent_id.as_str()), ("folders", "9"));
        assert_eq!(node.kind(), NodeKind::Project);
    }

    #[test]
    fn test_normalize_malformed_input_degrades_to_empty() {
        let node = ContainerNode::from_raw(&raw("", "something/Else", "garbage"));
        assert_eq!(node.id, "");
        assert_eq!(node.parent_type, "");
        assert_eq!(node.parent_id, "");
        assert_eq!(node.kind(), NodeKind::Other);

        let node = ContainerNode::from_raw(&raw("folders/", FOLDER_TYPE, ""));
        assert_eq!(node.id, "");
    }

    #[test]
    fn test_raw_asset_deserializes_camel_case_with_missing_fields() {
        let raw: RawAsset = serde_json::from_value(serde_json::json!({
            "name": "//compute.googleapis.com/projects/p/zones/z/instances/vm-1",
            "assetType": "compute.googleapis.com/Instance",
            "project": "projects/123",
            "parentFullResourceName": "//cloudresourcemanager.googleapis.com/projects/p"
        }))
        .unwrap();
        assert_eq!(raw.asset_type, "compute.googleapis.com/Instance");
        assert_eq!(raw.display_name, "");
        assert_eq!(raw.location, "");
    }

    #[test]
    fn test_resource_record_project_id_from_parent() {
        let record = ResourceRecord::from(RawAsset {
            name: "//storage.googleapis.com/my-bucket".to_string(),
            parent_full_resource_name: "//cloudresourcemanager.googleapis.com/projects/my-proj"
                .to_string(),
            ..Default::default()
        });
        assert_eq!(record.short_name(), "my-bucket");
        assert_eq!(record.parent_project_id(), "my-proj");

        let record = ResourceRecord::from(RawAsset {
            name: "//compute.googleapis.com/projects/p/global/networks/default".to_string(),
            parent_full_resource_name: "//compute.googleapis.com/projects/p".to_string(),
            ..Default::default()
        });
        assert_eq!(record.parent_project_id(), "");
    }

    #[test]
    fn test_container_node_json_field_names() {
        let node = ContainerNode::from_raw(&raw("folders/1", FOLDER_TYPE, "organizations/2"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["parent_id_type"], "organizations");
        assert_eq!(value["parent_id_value"], "2");
        assert_eq!(value["display_name"], "Display");
    }
}
