//! Item stats with modifier contributions
//!
//! ```text
//! effective = (base + Σflat) × (1 + Σpercent / 100)
//! ```
//!
//! Contributions only ever come from the item's modifier collection, and are
//! wiped wholesale before each reapplication.

use serde::{Deserialize, Serialize};

/// Well-known stat key for carry capacity
pub const MAX_WEIGHT: &str = "MaxWeight";

/// A single stat: a base value plus whatever modifiers currently contribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub key: String,
    pub base_value: f32,
    #[serde(skip)]
    flat_bonus: f32,
    #[serde(skip)]
    percent_bonus: f32,
}

impl Stat {
    pub fn new(key: impl Into<String>, base_value: f32) -> Self {
        Self {
            key: key.into(),
            base_value,
            flat_bonus: 0.0,
            percent_bonus: 0.0,
        }
    }

    /// Effective value after modifiers
    pub fn value(&self) -> f32 {
        (self.base_value + self.flat_bonus) * (1.0 + self.percent_bonus / 100.0)
    }

    pub fn flat_bonus(&self) -> f32 {
        self.flat_bonus
    }

    pub fn percent_bonus(&self) -> f32 {
        self.percent_bonus
    }

    pub(crate) fn add_flat(&mut self, amount: f32) {
        self.flat_bonus += amount;
    }

    pub(crate) fn add_percent(&mut self, amount: f32) {
        self.percent_bonus += amount;
    }

    pub(crate) fn clear_contributions(&mut self) {
        self.flat_bonus = 0.0;
        self.percent_bonus = 0.0;
    }
}

/// Keyed stat sheet, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatCollection {
    stats: Vec<Stat>,
}

impl StatCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a stat by key
    pub fn insert(&mut self, stat: Stat) {
        match self.stats.iter_mut().find(|s| s.key == stat.key) {
            Some(existing) => *existing = stat,
            None => self.stats.push(stat),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Stat> {
        self.stats.iter().find(|s| s.key == key)
    }

    /// Get a stat, materializing it with base 0 if absent
    pub(crate) fn get_or_insert(&mut self, key: &str) -> &mut Stat {
        let idx = match self.stats.iter().position(|s| s.key == key) {
            Some(idx) => idx,
            None => {
                self.stats.push(Stat::new(key, 0.0));
                self.stats.len() - 1
            }
        };
        &mut self.stats[idx]
    }

    /// Effective value of a stat, if present
    pub fn value(&self, key: &str) -> Option<f32> {
        self.get(key).map(Stat::value)
    }

    pub(crate) fn clear_contributions(&mut self) {
        for stat in &mut self.stats {
            stat.clear_contributions();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
