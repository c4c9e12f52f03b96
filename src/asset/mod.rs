//! Asset ingestion layer
//!
//! Everything between the Cloud Asset API and the in-memory model.
//!
//! # Architecture
//!
//! - [`record`] - Typed search results and their normalized forms
//! - [`search`] - Paginated `searchAllResources` calls and ingestion-time dedup
//! - [`registry`] - Short aliases for fully-qualified asset types
//! - [`scope`] - Parsing of `organizations/<id>` / `folders/<id>` scopes
//!
//! # Example
//!
//! ```ignore
//! use gcpassets::asset::{search_all, ContainerNode, SearchRequest, CONTAINER_TYPES};
//!
//! async fn containers(client: &GcpClient) -> anyhow::Result<Vec<ContainerNode>> {
//!     let request = SearchRequest::new("organizations/123", CONTAINER_TYPES);
//!     let raw = search_all(client, &request).await?;
//!     Ok(raw.iter().map(ContainerNode::from_raw).collect())
//! }
//! ```

pub mod record;
pub mod registry;
pub mod scope;
pub mod search;

pub use record::{
    ContainerNode, NodeKind, RawAsset, ResourceRecord, CONTAINER_TYPES, FOLDER_TYPE,
    ORGANIZATION_TYPE, PROJECT_TYPE,
};
pub use registry::{all_aliases, resolve_asset_type};
pub use scope::Scope;
pub use search::{
    dedup_resources, first_raw_result, search_all, search_resources, SearchRequest,
};
