//! Host-side registries the forge pipeline talks to
//!
//! The pipeline only sees these through the traits below, so tests can hand
//! it a fabricated registry.

pub mod catalog;
pub mod items;
pub mod tags;

pub use catalog::{Catalog, ItemDef};
pub use items::ItemRegistry;
pub use tags::TagRegistry;

use serde::Serialize;

use crate::core::types::ItemId;
use crate::item::{Item, TagRef};

/// Read-only template lookup
pub trait TemplateSource {
    fn get_prefab(&self, id: ItemId) -> Option<&Item>;
}

/// Tag lookup by exact name
pub trait TagSource {
    fn find_by_name(&self, name: &str) -> Option<TagRef>;
}

/// Publishing of newly built items.
///
/// `add_dynamic_entry` must either publish the item under its own type id or
/// hand it back untouched, leaving the registry as it was.
pub trait DynamicRegistry: TemplateSource {
    fn add_dynamic_entry(&mut self, item: Item) -> Result<(), RejectedEntry>;
}

/// Why a dynamic entry was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    DuplicateId(ItemId),
    NoDynamicSlot { capacity: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::DuplicateId(id) => write!(f, "id {} is already registered", id),
            RejectReason::NoDynamicSlot { capacity } => {
                write!(f, "all {} dynamic slots are in use", capacity)
            }
        }
    }
}

/// A refused item, handed back to the caller
#[derive(Debug)]
pub struct RejectedEntry {
    pub item: Item,
    pub reason: RejectReason,
}
