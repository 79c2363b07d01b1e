//! Item registry: native prefabs plus dynamically added entries

use ahash::AHashMap;

use super::{DynamicRegistry, RejectReason, RejectedEntry, TemplateSource};
use crate::core::types::ItemId;
use crate::item::Item;

/// Registry of every item the host knows about
pub struct ItemRegistry {
    /// Items defined by the host itself
    prefabs: AHashMap<ItemId, Item>,
    /// Items added at runtime
    dynamic: AHashMap<ItemId, Item>,
    /// Maximum number of dynamic entries (None = unbounded)
    dynamic_capacity: Option<usize>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            prefabs: AHashMap::new(),
            dynamic: AHashMap::new(),
            dynamic_capacity: None,
        }
    }

    pub fn with_dynamic_capacity(mut self, capacity: usize) -> Self {
        self.dynamic_capacity = Some(capacity);
        self
    }

    /// Register a native prefab under its own type id.
    ///
    /// Returns the item back if the id is already taken.
    pub fn register_native(&mut self, item: Item) -> Result<(), Item> {
        let id = item.type_id();
        if self.contains(id) {
            return Err(item);
        }
        self.prefabs.insert(id, item);
        Ok(())
    }

    /// Look up any item, native or dynamic
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.prefabs.get(&id).or_else(|| self.dynamic.get(&id))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.prefabs.contains_key(&id) || self.dynamic.contains_key(&id)
    }

    pub fn is_dynamic(&self, id: ItemId) -> bool {
        self.dynamic.contains_key(&id)
    }

    /// Remove a dynamic entry. Native prefabs cannot be removed.
    pub fn remove_dynamic_entry(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.dynamic.remove(&id);
        if removed.is_some() {
            tracing::debug!("Removed dynamic entry {}", id);
        }
        removed
    }

    /// Ids of all dynamic entries, sorted
    pub fn dynamic_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.dynamic.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn native_len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    pub fn len(&self) -> usize {
        self.prefabs.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty() && self.dynamic.is_empty()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSource for ItemRegistry {
    fn get_prefab(&self, id: ItemId) -> Option<&Item> {
        self.get(id)
    }
}

impl DynamicRegistry for ItemRegistry {
    fn add_dynamic_entry(&mut self, item: Item) -> Result<(), RejectedEntry> {
        let id = item.type_id();
        if self.contains(id) {
            return Err(RejectedEntry {
                item,
                reason: RejectReason::DuplicateId(id),
            });
        }
        if let Some(capacity) = self.dynamic_capacity {
            if self.dynamic.len() >= capacity {
                return Err(RejectedEntry {
                    item,
                    reason: RejectReason::NoDynamicSlot { capacity },
                });
            }
        }
        self.dynamic.insert(id, item);
        Ok(())
    }
}
