//! Global tag set

use std::sync::Arc;

use super::TagSource;
use crate::item::{Tag, TagRef};

#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<TagRef>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag and return the shared reference.
    ///
    /// A tag whose name is already known is not duplicated; the existing
    /// reference is returned instead.
    pub fn register(&mut self, tag: Tag) -> TagRef {
        if let Some(existing) = self.find_by_name(&tag.name) {
            return existing;
        }
        let tag = Arc::new(tag);
        self.tags.push(Arc::clone(&tag));
        tag
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagRef> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagSource for TagRegistry {
    fn find_by_name(&self, name: &str) -> Option<TagRef> {
        self.tags.iter().find(|t| t.name == name).cloned()
    }
}
