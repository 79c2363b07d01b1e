//! Item entities
//!
//! An `Item` is the unit the host registry stores. Templates ("prefabs") are
//! registered natively; forged items are owned clones that get patched and
//! then handed to the registry.
//!
//! Scalar attributes are only readable through the public contract. Writes
//! go through the public setters or, for the attribute patcher, directly to
//! the crate-visible fields.

pub mod modifier;
pub mod slot;
pub mod stats;
pub mod tag;

pub use modifier::{ModifierDescription, ModifierDescriptionCollection, ModifierTarget};
pub use slot::{Slot, SlotCollection};
pub use stats::{Stat, StatCollection, MAX_WEIGHT};
pub use tag::{Tag, TagRef};

use crate::core::types::{IconRef, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) name: String,
    pub(crate) type_id: ItemId,
    pub(crate) display_name: String,
    pub(crate) weight: f32,
    pub(crate) value: i32,
    pub(crate) quality: i32,
    pub(crate) order: i32,
    pub(crate) icon: Option<IconRef>,
    pub(crate) tags: Vec<TagRef>,
    pub(crate) slots: SlotCollection,
    pub(crate) modifiers: ModifierDescriptionCollection,
    pub(crate) stats: StatCollection,
}

impl Item {
    /// Bare item with default attributes and empty collections
    pub fn new(type_id: ItemId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            type_id,
            weight: 0.0,
            value: 0,
            quality: 0,
            order: 0,
            icon: None,
            tags: Vec::new(),
            slots: SlotCollection::new(),
            modifiers: ModifierDescriptionCollection::new(),
            stats: StatCollection::new(),
        }
    }

    // === Read access ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> ItemId {
        self.type_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn icon(&self) -> Option<&IconRef> {
        self.icon.as_ref()
    }

    pub fn tags(&self) -> &[TagRef] {
        &self.tags
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn slots(&self) -> &SlotCollection {
        &self.slots
    }

    pub fn modifiers(&self) -> &ModifierDescriptionCollection {
        &self.modifiers
    }

    pub fn stats(&self) -> &StatCollection {
        &self.stats
    }

    /// Effective value of a stat after modifiers, if the item carries it
    pub fn effective_stat(&self, key: &str) -> Option<f32> {
        self.stats.value(key)
    }

    // === Public setters ===

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn set_quality(&mut self, quality: i32) {
        self.quality = quality;
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    pub fn set_icon(&mut self, icon: Option<IconRef>) {
        self.icon = icon;
    }

    // === Builders for catalogs and tests ===

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add a slot; a slot whose id is already present is ignored
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.add(slot);
        self
    }

    /// Insert or replace a stat, then reapply the modifier set so the
    /// stat keeps its contributions
    pub fn with_stat(mut self, stat: Stat) -> Self {
        self.stats.insert(stat);
        self.reapply_modifiers();
        self
    }

    /// Add a modifier and reapply the whole set
    pub fn with_modifier(mut self, modifier: ModifierDescription) -> Self {
        self.modifiers.add(modifier);
        self.reapply_modifiers();
        self
    }

    // === Collections ===

    pub(crate) fn tags_mut(&mut self) -> &mut Vec<TagRef> {
        &mut self.tags
    }

    pub(crate) fn slots_mut(&mut self) -> &mut SlotCollection {
        &mut self.slots
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut ModifierDescriptionCollection {
        &mut self.modifiers
    }

    /// Recompute stat contributions from the current modifier set
    pub fn reapply_modifiers(&mut self) {
        self.modifiers.reapply(&mut self.stats);
    }
}
