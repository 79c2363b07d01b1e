//! Item tags

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A named tag object owned by the host tag registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

/// Shared reference to a registered tag; items never own their tags
pub type TagRef = Arc<Tag>;
