//! gcpassets
//!
//! Inventory GCP resources under an organization or folder through the Cloud
//! Asset API and render them as a flat list or as the folder/project tree.
//!
//! Data flows one way: raw search results ([`asset`]) are normalized into
//! container nodes, assembled into a [`hierarchy::Forest`], and handed to
//! one of the [`render`] formats.

pub mod asset;
pub mod config;
pub mod gcp;
pub mod hierarchy;
pub mod progress;
pub mod render;

/// Version injected at compile time via GCPASSETS_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("GCPASSETS_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
