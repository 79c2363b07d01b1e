//! Forge configuration
//!
//! Describes which items to forge and how. Loaded from TOML; the default is
//! the built-in ULTRA military backpack.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::error::{ForgeError, Result};
use crate::core::types::ItemId;
use crate::item::{ModifierDescription, MAX_WEIGHT};
use crate::patch::AttributeOverride;

/// Attribute names that carry the item's id. Only `new_id` may set it.
pub const ID_ATTRIBUTES: &[&str] = &["typeID", "TypeID"];

fn is_id_attribute(name: &str) -> bool {
    ID_ATTRIBUTES.contains(&name)
}

/// Settings shared by every item in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeSettings {
    /// Template whose first slot supplies the kind and icon for new slots
    pub slot_template_id: ItemId,

    /// New slot ids are `<prefix>_<index>`
    pub slot_key_prefix: String,

    /// Minimum item count before preparation runs on the rayon pool.
    ///
    /// Below this the thread hand-off costs more than the work.
    pub parallel_threshold: usize,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            slot_template_id: ItemId(1255),
            slot_key_prefix: "UltraSlot".to_string(),
            parallel_threshold: 4,
        }
    }
}

/// One item to forge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Template to clone
    pub template_id: ItemId,
    /// Id the new item is registered under
    pub new_id: ItemId,
    /// Human-readable name, written to localization on success
    pub display_name: String,
    /// Localization key stored on the item as its display name
    pub localization_key: String,
    /// Description text, written under `<localization_key>_Desc`
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub quality: Option<i32>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub icon: Option<String>,
    pub slot_count: usize,
    /// Flat MaxWeight bonus
    #[serde(default)]
    pub weight_bonus: Option<f32>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Extra attribute overrides, applied after the built-in ones
    #[serde(default)]
    pub overrides: Vec<AttributeOverride>,
    /// Extra modifiers, added after the weight bonus
    #[serde(default)]
    pub modifiers: Vec<ModifierDescription>,
}

impl ItemConfig {
    /// The ULTRA military backpack
    pub fn ultra_backpack() -> Self {
        Self {
            template_id: ItemId(40),
            new_id: ItemId(100006),
            display_name: "Military Backpack ULTRA".to_string(),
            localization_key: "militarybackpack_ultra".to_string(),
            description: "The ultimate military backpack: huge capacity and +200 carry weight."
                .to_string(),
            weight: Some(1.0),
            value: Some(1_000_000),
            quality: Some(5),
            order: 0,
            icon: None,
            slot_count: 6,
            weight_bonus: Some(200.0),
            tags: vec![
                "Backpack".to_string(),
                "Equipment".to_string(),
                "Unique".to_string(),
            ],
            overrides: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn localization_desc_key(&self) -> String {
        format!("{}_Desc", self.localization_key)
    }

    /// Ordered attribute overrides for this item.
    ///
    /// Free-form overrides of the id attribute are dropped; the item is
    /// always published under `new_id`.
    pub fn attribute_overrides(&self) -> Vec<AttributeOverride> {
        let mut overrides = vec![AttributeOverride::new("typeID", self.new_id.0)];
        if let Some(weight) = self.weight {
            overrides.push(AttributeOverride::new("weight", weight));
        }
        if let Some(value) = self.value {
            overrides.push(AttributeOverride::new("value", value));
        }
        overrides.push(AttributeOverride::new(
            "displayName",
            self.localization_key.as_str(),
        ));
        if let Some(quality) = self.quality {
            overrides.push(AttributeOverride::new("quality", quality));
        }
        overrides.push(AttributeOverride::new("order", self.order));
        if let Some(icon) = &self.icon {
            overrides.push(AttributeOverride::new("icon", icon.as_str()));
        }
        for extra in &self.overrides {
            if is_id_attribute(&extra.name) {
                tracing::warn!(
                    "Ignoring '{}' override on {}: the id comes from new_id",
                    extra.name,
                    self.display_name
                );
                continue;
            }
            overrides.push(extra.clone());
        }
        overrides
    }

    /// Modifier set the forged item ends up with
    pub fn modifier_descriptions(&self) -> Vec<ModifierDescription> {
        self.weight_bonus
            .map(|bonus| ModifierDescription::flat(MAX_WEIGHT, bonus))
            .into_iter()
            .chain(self.modifiers.iter().cloned())
            .collect()
    }
}

/// Full forge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub settings: ForgeSettings,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            settings: ForgeSettings::default(),
            items: vec![ItemConfig::ultra_backpack()],
        }
    }
}

impl ForgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ForgeError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.settings.slot_key_prefix.is_empty() {
            return Err(ForgeError::Config("slot_key_prefix must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if item.new_id == item.template_id {
                return Err(ForgeError::Config(format!(
                    "item '{}' uses its template id {} as new id",
                    item.display_name, item.new_id
                )));
            }
            if let Some(extra) = item.overrides.iter().find(|o| is_id_attribute(&o.name)) {
                return Err(ForgeError::Config(format!(
                    "item '{}' overrides '{}'; set new_id instead",
                    item.display_name, extra.name
                )));
            }
            if !seen.insert(item.new_id) {
                return Err(ForgeError::Config(format!(
                    "new id {} is configured more than once",
                    item.new_id
                )));
            }
        }

        Ok(())
    }
}
