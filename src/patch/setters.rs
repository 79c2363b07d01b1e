//! Name-keyed setter table for items
//!
//! Two tiers, looked up in order: field-like names that write the item's
//! storage directly, then accessor-style names that go through the item's
//! public setters.

use ahash::AHashMap;

use super::{AttributeValue, PatchError};
use crate::core::types::{IconRef, ItemId};
use crate::item::Item;

/// Assigns one attribute value to an item
pub type AttributeSetter = fn(&mut Item, &str, &AttributeValue) -> Result<(), PatchError>;

/// Which tier a name resolved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterKind {
    Field,
    Property,
}

pub struct SetterTable {
    fields: AHashMap<&'static str, AttributeSetter>,
    properties: AHashMap<&'static str, AttributeSetter>,
}

impl SetterTable {
    pub fn empty() -> Self {
        Self {
            fields: AHashMap::new(),
            properties: AHashMap::new(),
        }
    }

    /// The setter table for `Item`
    pub fn for_items() -> Self {
        let mut table = Self::empty();

        table.field("typeID", |item, name, value| {
            item.type_id = ItemId(value.as_u32(name)?);
            Ok(())
        });
        table.field("name", |item, name, value| {
            item.name = value.as_str(name)?.to_string();
            Ok(())
        });
        table.field("displayName", |item, name, value| {
            item.display_name = value.as_str(name)?.to_string();
            Ok(())
        });
        table.field("weight", |item, name, value| {
            item.weight = value.as_f32(name)?;
            Ok(())
        });
        table.field("value", |item, name, value| {
            item.value = value.as_i32(name)?;
            Ok(())
        });
        table.field("quality", |item, name, value| {
            item.quality = value.as_i32(name)?;
            Ok(())
        });
        table.field("order", |item, name, value| {
            item.order = value.as_i32(name)?;
            Ok(())
        });
        table.field("icon", |item, name, value| {
            item.icon = Some(IconRef::new(value.as_str(name)?));
            Ok(())
        });

        table.property("TypeID", |item, name, value| {
            item.type_id = ItemId(value.as_u32(name)?);
            Ok(())
        });
        table.property("Name", |item, name, value| {
            item.set_name(value.as_str(name)?);
            Ok(())
        });
        table.property("DisplayName", |item, name, value| {
            item.set_display_name(value.as_str(name)?);
            Ok(())
        });
        table.property("Weight", |item, name, value| {
            item.set_weight(value.as_f32(name)?);
            Ok(())
        });
        table.property("Value", |item, name, value| {
            item.set_value(value.as_i32(name)?);
            Ok(())
        });
        table.property("Quality", |item, name, value| {
            item.set_quality(value.as_i32(name)?);
            Ok(())
        });
        table.property("Order", |item, name, value| {
            item.set_order(value.as_i32(name)?);
            Ok(())
        });
        table.property("Icon", |item, name, value| {
            item.set_icon(Some(IconRef::new(value.as_str(name)?)));
            Ok(())
        });

        table
    }

    pub fn field(&mut self, name: &'static str, setter: AttributeSetter) {
        self.fields.insert(name, setter);
    }

    pub fn property(&mut self, name: &'static str, setter: AttributeSetter) {
        self.properties.insert(name, setter);
    }

    /// Resolve a name: fields first, then properties
    pub fn lookup(&self, name: &str) -> Option<(SetterKind, AttributeSetter)> {
        self.fields
            .get(name)
            .map(|s| (SetterKind::Field, *s))
            .or_else(|| self.properties.get(name).map(|s| (SetterKind::Property, *s)))
    }

    /// All known names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .fields
            .keys()
            .chain(self.properties.keys())
            .copied()
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl Default for SetterTable {
    fn default() -> Self {
        Self::for_items()
    }
}
