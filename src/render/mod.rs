//! Output rendering
//!
//! Every renderer is a pure function over an already-built [`Forest`] or a
//! fetched resource list; none of them mutate their input.
//!
//! - [`tree`] - indented plain text
//! - [`json`] - structured JSON document
//! - [`table`] - fixed-width table
//! - [`pretty`] - Unicode box-drawing tree
//! - [`resources`] - flat resource list (table, CSV, JSON)

pub mod json;
pub mod pretty;
pub mod resources;
pub mod table;
pub mod tree;

use crate::asset::record::ResourceRecord;
use crate::hierarchy::Forest;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output formats for `hierarchy`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyFormat {
    #[default]
    Tree,
    Json,
    Tabular,
    Pretty,
}

impl HierarchyFormat {
    pub fn render(self, forest: &Forest, scope: &str) -> Result<String> {
        tracing::debug!("Rendering hierarchy as {:?}", self);
        match self {
            HierarchyFormat::Tree => Ok(tree::render(forest)),
            HierarchyFormat::Json => {
                json::render(forest).context("Failed to serialize hierarchy")
            }
            HierarchyFormat::Tabular => Ok(table::render(forest)),
            HierarchyFormat::Pretty => Ok(pretty::render(forest, scope)),
        }
    }
}

/// Output formats for `list-resources`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    #[default]
    Tabular,
    Csv,
    Json,
}

impl ResourceFormat {
    pub fn render(self, resources: &[ResourceRecord], scope: &str) -> Result<String> {
        tracing::debug!("Rendering {} resources as {:?}", resources.len(), self);
        match self {
            ResourceFormat::Tabular => Ok(resources::render_table(resources, scope)),
            ResourceFormat::Csv => resources::render_csv(resources, scope),
            ResourceFormat::Json => {
                resources::render_json(resources, scope).context("Failed to serialize resources")
            }
        }
    }
}
