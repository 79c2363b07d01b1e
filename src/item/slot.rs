//! Interaction/storage slots carried by an item

use serde::{Deserialize, Serialize};

use crate::core::types::IconRef;

/// One slot on an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique key within the owning item
    pub id: String,
    /// What the slot accepts; shared between slots built from one pattern
    pub kind: String,
    #[serde(default)]
    pub icon: Option<IconRef>,
}

impl Slot {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<IconRef>) -> Self {
        self.icon = icon;
        self
    }
}

/// Ordered slot list with unique ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotCollection {
    slots: Vec<Slot>,
}

impl SlotCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot. Returns false (and drops the slot) if its id is taken.
    pub fn add(&mut self, slot: Slot) -> bool {
        if self.contains(&slot.id) {
            return false;
        }
        self.slots.push(slot);
        true
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn first(&self) -> Option<&Slot> {
        self.slots.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut slots = SlotCollection::new();
        assert!(slots.add(Slot::new("a", "Backpack")));
        assert!(!slots.add(Slot::new("a", "Weapon")));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots.get("a").unwrap().kind, "Backpack");
    }

    #[test]
    fn test_clear_and_first() {
        let mut slots = SlotCollection::new();
        slots.add(Slot::new("a", "Backpack").with_icon(Some(IconRef::new("slot_bp"))));
        slots.add(Slot::new("b", "Backpack"));
        assert_eq!(slots.first().unwrap().id, "a");
        assert_eq!(slots.ids(), vec!["a".to_string(), "b".to_string()]);

        slots.clear();
        assert!(slots.is_empty());
        assert!(slots.first().is_none());
    }
}
