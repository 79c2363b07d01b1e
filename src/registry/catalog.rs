//! Host catalog loading
//!
//! A catalog is a TOML document describing the tags and native items the
//! host starts with. It stands in for the host's own asset database.

use serde::Deserialize;
use std::path::Path;

use super::{ItemRegistry, TagRegistry, TagSource};
use crate::core::error::{ForgeError, Result};
use crate::core::types::{IconRef, ItemId};
use crate::item::{Item, ModifierDescription, Slot, Stat, Tag, MAX_WEIGHT};

/// Native item definition
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub weight: f32,
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub quality: i32,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub icon: Option<IconRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub modifiers: Vec<ModifierDescription>,
}

impl ItemDef {
    /// Build the item, resolving tag names strictly
    pub fn build(&self, tags: &TagRegistry) -> Result<Item> {
        let mut item = Item::new(self.id, self.name.clone())
            .with_weight(self.weight)
            .with_value(self.value)
            .with_quality(self.quality)
            .with_order(self.order);
        if let Some(display_name) = &self.display_name {
            item.set_display_name(display_name.clone());
        }
        item.set_icon(self.icon.clone());

        for name in &self.tags {
            let tag = tags.find_by_name(name).ok_or_else(|| {
                ForgeError::Catalog(format!("item {} references unknown tag '{}'", self.id, name))
            })?;
            item = item.with_tag(tag);
        }

        for slot in &self.slots {
            if item.slots().contains(&slot.id) {
                return Err(ForgeError::Catalog(format!(
                    "item {} has duplicate slot id '{}'",
                    self.id, slot.id
                )));
            }
            item = item.with_slot(slot.clone());
        }

        for stat in &self.stats {
            item = item.with_stat(stat.clone());
        }
        for modifier in &self.modifiers {
            item.modifiers_mut().add(modifier.clone());
        }
        item.reapply_modifiers();

        Ok(item)
    }
}

/// Tags and native items the host starts with
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub dynamic_capacity: Option<usize>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

impl Catalog {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ForgeError::Catalog(format!("{}: {}", path.display(), e)))
    }

    /// Built-in catalog: the military backpack and the pouch used as the
    /// slot pattern, plus a backpack that ships with its own modifier.
    pub fn builtin() -> Self {
        let slot = |id: &str, kind: &str, icon: &str| {
            Slot::new(id, kind).with_icon(Some(IconRef::new(icon)))
        };

        Self {
            dynamic_capacity: Some(64),
            tags: ["Backpack", "Equipment", "Unique", "Container", "Special"]
                .into_iter()
                .map(Tag::new)
                .collect(),
            items: vec![
                ItemDef {
                    id: ItemId(40),
                    name: "MilitaryBackpack".to_string(),
                    display_name: Some("Item_MilitaryBackpack".to_string()),
                    weight: 1.0,
                    value: 2800,
                    quality: 3,
                    order: 12,
                    icon: Some(IconRef::new("icon_military_backpack")),
                    tags: vec!["Backpack".to_string(), "Equipment".to_string()],
                    slots: vec![
                        slot("Backpack_0", "Pouch", "slot_pouch"),
                        slot("Backpack_1", "Pouch", "slot_pouch"),
                    ],
                    stats: vec![Stat::new(MAX_WEIGHT, 0.0), Stat::new("InventoryCapacity", 20.0)],
                    modifiers: Vec::new(),
                },
                ItemDef {
                    id: ItemId(254),
                    name: "HuntingBackpack".to_string(),
                    display_name: Some("Item_HuntingBackpack".to_string()),
                    weight: 1.5,
                    value: 1200,
                    quality: 2,
                    order: 11,
                    icon: Some(IconRef::new("icon_hunting_backpack")),
                    tags: vec!["Backpack".to_string(), "Equipment".to_string()],
                    slots: vec![slot("Backpack_0", "Pouch", "slot_pouch")],
                    stats: vec![Stat::new(MAX_WEIGHT, 0.0)],
                    modifiers: vec![ModifierDescription::flat(MAX_WEIGHT, 30.0)],
                },
                ItemDef {
                    id: ItemId(1255),
                    name: "TacticalPouch".to_string(),
                    display_name: Some("Item_TacticalPouch".to_string()),
                    weight: 0.3,
                    value: 600,
                    quality: 2,
                    order: 30,
                    icon: Some(IconRef::new("icon_tactical_pouch")),
                    tags: vec!["Container".to_string()],
                    slots: vec![slot("Pouch_0", "Container", "slot_container")],
                    stats: Vec::new(),
                    modifiers: Vec::new(),
                },
            ],
        }
    }

    /// Build the host registries described by this catalog
    pub fn build(&self) -> Result<(ItemRegistry, TagRegistry)> {
        let mut tags = TagRegistry::new();
        for tag in &self.tags {
            tags.register(tag.clone());
        }

        let mut items = match self.dynamic_capacity {
            Some(capacity) => ItemRegistry::new().with_dynamic_capacity(capacity),
            None => ItemRegistry::new(),
        };
        for def in &self.items {
            let item = def.build(&tags)?;
            items.register_native(item).map_err(|item| {
                ForgeError::Catalog(format!("duplicate item id {}", item.type_id()))
            })?;
        }

        tracing::info!(
            "Catalog loaded: {} items, {} tags",
            items.native_len(),
            tags.len()
        );
        Ok((items, tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TemplateSource;

    #[test]
    fn test_builtin_catalog_builds() {
        let (items, tags) = Catalog::builtin().build().unwrap();
        assert_eq!(items.native_len(), 3);
        assert_eq!(tags.len(), 5);

        let backpack = items.get_prefab(ItemId(40)).unwrap();
        assert_eq!(backpack.weight(), 1.0);
        assert_eq!(backpack.slots().len(), 2);
        assert!(backpack.modifiers().is_empty());

        let hunting = items.get_prefab(ItemId(254)).unwrap();
        assert_eq!(hunting.effective_stat(MAX_WEIGHT), Some(30.0));
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
dynamic_capacity = 2

[[tags]]
name = "Backpack"

[[items]]
id = 7
name = "Satchel"
weight = 0.5
tags = ["Backpack"]

[[items.slots]]
id = "s0"
kind = "Pouch"

[[items.stats]]
key = "MaxWeight"
base_value = 5.0

[[items.modifiers]]
key = "MaxWeight"
value = 10.0
"#,
        )
        .unwrap();

        let (items, _) = catalog.build().unwrap();
        let satchel = items.get_prefab(ItemId(7)).unwrap();
        assert_eq!(satchel.display_name(), "Satchel");
        assert_eq!(satchel.slots().get("s0").unwrap().kind, "Pouch");
        assert_eq!(satchel.effective_stat(MAX_WEIGHT), Some(15.0));
    }

    #[test]
    fn test_unknown_tag_is_catalog_error() {
        let catalog = Catalog::from_toml_str(
            r#"
[[items]]
id = 7
name = "Satchel"
tags = ["Missing"]
"#,
        )
        .unwrap();
        assert!(matches!(catalog.build(), Err(ForgeError::Catalog(_))));
    }

    #[test]
    fn test_duplicate_item_id_is_catalog_error() {
        let catalog = Catalog::from_toml_str(
            r#"
[[items]]
id = 7
name = "A"

[[items]]
id = 7
name = "B"
"#,
        )
        .unwrap();
        assert!(matches!(catalog.build(), Err(ForgeError::Catalog(_))));
    }

    #[test]
    fn test_load_data_catalog() {
        // Only runs if the data directory exists
        let path = Path::new("data/catalog.toml");
        if path.exists() {
            let catalog = Catalog::load(path).unwrap();
            let (items, _) = catalog.build().unwrap();
            assert!(items.get_prefab(ItemId(40)).is_some());
            assert!(items.get_prefab(ItemId(1255)).is_some());
        }
    }
}
