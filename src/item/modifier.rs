//! Modifier descriptions and their reapplication onto an item's stats

use serde::{Deserialize, Serialize};

use super::stats::StatCollection;

/// Which object a modifier is aimed at. Carried through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierTarget(pub i32);

/// Describes one derived effect on a stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDescription {
    #[serde(default)]
    pub target: ModifierTarget,
    /// Stat key this modifier adjusts
    pub key: String,
    /// Uninterpreted; preserved as given (zero for new modifiers)
    #[serde(default)]
    pub reserved_type: i32,
    pub value: f32,
    #[serde(default)]
    pub is_percentage: bool,
    /// Uninterpreted; preserved as given (zero for new modifiers)
    #[serde(default)]
    pub reserved_order: i32,
}

impl ModifierDescription {
    /// Flat (non-percentage) modifier with reserved fields zeroed
    pub fn flat(key: impl Into<String>, value: f32) -> Self {
        Self {
            target: ModifierTarget::default(),
            key: key.into(),
            reserved_type: 0,
            value,
            is_percentage: false,
            reserved_order: 0,
        }
    }

    /// Percentage modifier with reserved fields zeroed
    pub fn percent(key: impl Into<String>, value: f32) -> Self {
        Self {
            is_percentage: true,
            ..Self::flat(key, value)
        }
    }
}

/// The modifier set an item holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierDescriptionCollection {
    descriptions: Vec<ModifierDescription>,
}

impl ModifierDescriptionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, description: ModifierDescription) {
        self.descriptions.push(description);
    }

    pub fn clear(&mut self) {
        self.descriptions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModifierDescription> {
        self.descriptions.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Recompute every stat contribution from the current set.
    ///
    /// All existing contributions are dropped first, so calling this any
    /// number of times yields the same effective values, and contributions
    /// from a set that was since cleared do not survive.
    pub fn reapply(&self, stats: &mut StatCollection) {
        stats.clear_contributions();
        for description in &self.descriptions {
            let stat = stats.get_or_insert(&description.key);
            if description.is_percentage {
                stat.add_percent(description.value);
            } else {
                stat.add_flat(description.value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::stats::{Stat, MAX_WEIGHT};

    #[test]
    fn test_reapply_is_idempotent() {
        let mut stats = StatCollection::new();
        stats.insert(Stat::new(MAX_WEIGHT, 30.0));

        let mut modifiers = ModifierDescriptionCollection::new();
        modifiers.add(ModifierDescription::flat(MAX_WEIGHT, 200.0));

        modifiers.reapply(&mut stats);
        let first = stats.value(MAX_WEIGHT);
        modifiers.reapply(&mut stats);
        assert_eq!(stats.value(MAX_WEIGHT), first);
        assert_eq!(first, Some(230.0));
    }

    #[test]
    fn test_reapply_removes_cleared_contributions() {
        let mut stats = StatCollection::new();
        stats.insert(Stat::new(MAX_WEIGHT, 30.0));

        let mut modifiers = ModifierDescriptionCollection::new();
        modifiers.add(ModifierDescription::flat(MAX_WEIGHT, 50.0));
        modifiers.add(ModifierDescription::percent(MAX_WEIGHT, 100.0));
        modifiers.reapply(&mut stats);
        assert_eq!(stats.value(MAX_WEIGHT), Some(160.0));

        modifiers.clear();
        modifiers.reapply(&mut stats);
        assert_eq!(stats.value(MAX_WEIGHT), Some(30.0));
    }

    #[test]
    fn test_flat_modifier_reserved_fields_zeroed() {
        let modifier = ModifierDescription::flat(MAX_WEIGHT, 200.0);
        assert_eq!(modifier.target, ModifierTarget(0));
        assert_eq!(modifier.reserved_type, 0);
        assert_eq!(modifier.reserved_order, 0);
        assert!(!modifier.is_percentage);
    }

    #[test]
    fn test_reserved_fields_survive_toml_round_trip() {
        let modifier = ModifierDescription {
            target: ModifierTarget(3),
            key: MAX_WEIGHT.to_string(),
            reserved_type: 7,
            value: 12.5,
            is_percentage: true,
            reserved_order: -2,
        };
        let text = toml::to_string(&modifier).unwrap();
        let parsed: ModifierDescription = toml::from_str(&text).unwrap();
        assert_eq!(parsed, modifier);
    }
}
