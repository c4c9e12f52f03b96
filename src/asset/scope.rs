//! Query scope (`organizations/<id>` or `folders/<id>`)

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// Root of a hierarchy query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// `organizations` or `folders`
    pub parent_type: String,
    pub parent_id: String,
}

impl FromStr for Scope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((parent_type, parent_id)) = s.split_once('/') else {
            bail!("expected '<type>/<id>'");
        };

        if parent_type != "organizations" && parent_type != "folders" {
            bail!("unsupported scope type '{}'", parent_type);
        }

        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            bail!("missing scope id");
        }

        Ok(Self {
            parent_type: parent_type.to_string(),
            parent_id: parent_id.to_string(),
        })
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.parent_type, self.parent_id)
    }
}
