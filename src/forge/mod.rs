//! Item forging pipeline
//!
//! Derives a new item from a registered template in one linear pass:
//!
//! ```text
//! LookedUp → Cloned → AttributesPatched → CollectionsReplaced → EffectsApplied → Registered
//!                                                                             ↘ RolledBack
//! ```
//!
//! A missing template ends the run before anything is cloned. A registry
//! refusal releases the clone and leaves the registry untouched. Everything
//! in between is best effort: unknown attributes and tags are logged and
//! skipped.

pub mod clone;
pub mod collections;
pub mod effects;
pub mod registrar;

pub use clone::clone_template;
pub use collections::{replace_slots, replace_tags, SlotPattern, TagReport};
pub use effects::replace_modifiers;
pub use registrar::register;

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

use crate::core::config::{ForgeSettings, ItemConfig};
use crate::core::error::{ForgeError, Result};
use crate::core::types::ItemId;
use crate::item::{Item, MAX_WEIGHT};
use crate::patch::{apply_overrides, PatchReport, SetterTable};
use crate::registry::{DynamicRegistry, TagSource, TemplateSource};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForgeStage {
    LookedUp,
    Cloned,
    AttributesPatched,
    CollectionsReplaced,
    EffectsApplied,
    Registered,
    RolledBack,
}

impl ForgeStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ForgeStage::Registered | ForgeStage::RolledBack)
    }
}

/// A fully patched item that has not been registered yet
#[derive(Debug)]
pub struct PreparedItem {
    pub item: Item,
    pub template_id: ItemId,
    pub patch: PatchReport,
    pub tags: TagReport,
    pub slot_ids: Vec<String>,
    pub stage: ForgeStage,
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForgeReport {
    pub template_id: ItemId,
    pub new_id: ItemId,
    pub name: String,
    pub display_name: String,
    pub stage: ForgeStage,
    pub applied_attributes: Vec<String>,
    pub unknown_attributes: Vec<String>,
    pub rejected_attributes: Vec<String>,
    pub tags: Vec<String>,
    pub missing_tags: Vec<String>,
    pub slot_ids: Vec<String>,
    pub modifier_count: usize,
    pub max_weight: Option<f32>,
}

impl ForgeReport {
    fn new(prepared: &PreparedItem, new_id: ItemId) -> Self {
        Self {
            template_id: prepared.template_id,
            new_id,
            name: prepared.item.name().to_string(),
            display_name: prepared.item.display_name().to_string(),
            stage: ForgeStage::Registered,
            applied_attributes: owned(prepared.patch.applied()),
            unknown_attributes: owned(prepared.patch.not_found()),
            rejected_attributes: owned(prepared.patch.rejected()),
            tags: prepared.tags.resolved.clone(),
            missing_tags: prepared.tags.missing.clone(),
            slot_ids: prepared.slot_ids.clone(),
            modifier_count: prepared.item.modifiers().len(),
            max_weight: prepared.item.effective_stat(MAX_WEIGHT),
        }
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}

fn advance(stage: &mut ForgeStage, next: ForgeStage, new_id: ItemId) {
    tracing::debug!("Forge {}: {:?} -> {:?}", new_id, stage, next);
    *stage = next;
}

/// Runs the pipeline with one setter table and one set of settings
pub struct Forge {
    setters: SetterTable,
    settings: ForgeSettings,
}

impl Forge {
    pub fn new(settings: ForgeSettings) -> Self {
        Self {
            setters: SetterTable::for_items(),
            settings,
        }
    }

    pub fn with_setters(settings: ForgeSettings, setters: SetterTable) -> Self {
        Self { setters, settings }
    }

    pub fn settings(&self) -> &ForgeSettings {
        &self.settings
    }

    /// Every stage short of registration. Only reads the template source.
    pub fn prepare<R, T>(&self, templates: &R, tags: &T, config: &ItemConfig) -> Result<PreparedItem>
    where
        R: TemplateSource + ?Sized,
        T: TagSource + ?Sized,
    {
        let new_id = config.new_id;
        let mut stage = ForgeStage::LookedUp;

        let mut item = clone_template(templates, config.template_id, new_id)?;
        advance(&mut stage, ForgeStage::Cloned, new_id);

        let patch = apply_overrides(&mut item, &self.setters, &config.attribute_overrides());
        advance(&mut stage, ForgeStage::AttributesPatched, new_id);

        let tag_report = replace_tags(&mut item, tags, &config.tags);
        let pattern = SlotPattern::from_template(templates, self.settings.slot_template_id)?;
        let slot_ids = replace_slots(
            &mut item,
            &pattern,
            &self.settings.slot_key_prefix,
            config.slot_count,
        );
        advance(&mut stage, ForgeStage::CollectionsReplaced, new_id);

        replace_modifiers(&mut item, &config.modifier_descriptions());
        advance(&mut stage, ForgeStage::EffectsApplied, new_id);

        Ok(PreparedItem {
            item,
            template_id: config.template_id,
            patch,
            tags: tag_report,
            slot_ids,
            stage,
        })
    }

    /// Publish a prepared item
    pub fn commit<R>(&self, registry: &mut R, mut prepared: PreparedItem) -> Result<ForgeReport>
    where
        R: DynamicRegistry + ?Sized,
    {
        let new_id = prepared.item.type_id();
        let mut report = ForgeReport::new(&prepared, new_id);

        match register(registry, prepared.item) {
            Ok(_) => {
                advance(&mut prepared.stage, ForgeStage::Registered, new_id);
                report.stage = prepared.stage;
                Ok(report)
            }
            Err(e) => {
                advance(&mut prepared.stage, ForgeStage::RolledBack, new_id);
                Err(e)
            }
        }
    }

    /// Run the whole pipeline for one item
    pub fn forge<R, T>(&self, registry: &mut R, tags: &T, config: &ItemConfig) -> Result<ForgeReport>
    where
        R: DynamicRegistry + ?Sized,
        T: TagSource + ?Sized,
    {
        tracing::info!(
            "Forging {} from template {} as {}",
            config.display_name,
            config.template_id,
            config.new_id
        );
        let prepared = self.prepare(&*registry, tags, config)?;
        self.commit(registry, prepared)
    }

    /// Forge several items; results come back in input order.
    ///
    /// Preparation runs on the rayon pool once there are at least
    /// `parallel_threshold` items and no item is templated on another
    /// item's new id. Registration is always sequential, in input order.
    pub fn forge_all<R, T>(
        &self,
        registry: &mut R,
        tags: &T,
        configs: &[ItemConfig],
    ) -> Vec<Result<ForgeReport>>
    where
        R: DynamicRegistry + Sync,
        T: TagSource + Sync,
    {
        if !self.can_prepare_in_parallel(configs) {
            return configs
                .iter()
                .map(|config| self.forge(registry, tags, config))
                .collect();
        }

        tracing::debug!("Preparing {} items in parallel", configs.len());
        let prepared: Vec<Result<PreparedItem>> = {
            let templates: &R = registry;
            configs
                .par_iter()
                .map(|config| self.prepare(templates, tags, config))
                .collect()
        };

        prepared
            .into_iter()
            .map(|result| result.and_then(|p| self.commit(registry, p)))
            .collect()
    }

    fn can_prepare_in_parallel(&self, configs: &[ItemConfig]) -> bool {
        if configs.len() < self.settings.parallel_threshold.max(2) {
            return false;
        }
        let new_ids: HashSet<ItemId> = configs.iter().map(|c| c.new_id).collect();
        let chained = configs.iter().any(|c| {
            new_ids.contains(&c.template_id) || new_ids.contains(&self.settings.slot_template_id)
        });
        !chained
    }
}

impl Default for Forge {
    fn default() -> Self {
        Self::new(ForgeSettings::default())
    }
}

/// Convenience: forge one item with default settings
pub fn forge_item<R, T>(registry: &mut R, tags: &T, config: &ItemConfig) -> Result<ForgeReport>
where
    R: DynamicRegistry + ?Sized,
    T: TagSource + ?Sized,
{
    Forge::default().forge(registry, tags, config)
}

/// True if the error ended a run before anything was cloned
pub fn is_lookup_failure(error: &ForgeError) -> bool {
    matches!(error, ForgeError::TemplateNotFound(_))
}

/// Last stage a failed run reached
pub fn failed_stage(error: &ForgeError) -> ForgeStage {
    match error {
        ForgeError::SlotPatternUnavailable { .. } => ForgeStage::AttributesPatched,
        ForgeError::RegistrationConflict { .. } => ForgeStage::RolledBack,
        _ => ForgeStage::LookedUp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Catalog;

    fn make_host() -> (crate::registry::ItemRegistry, crate::registry::TagRegistry) {
        Catalog::builtin().build().unwrap()
    }

    fn make_config(template: u32, new_id: u32) -> ItemConfig {
        ItemConfig {
            template_id: ItemId(template),
            new_id: ItemId(new_id),
            ..ItemConfig::ultra_backpack()
        }
    }

    #[test]
    fn test_prepare_reaches_effects_applied() {
        let (items, tags) = make_host();
        let forge = Forge::default();

        let prepared = forge
            .prepare(&items, &tags, &ItemConfig::ultra_backpack())
            .unwrap();

        assert_eq!(prepared.stage, ForgeStage::EffectsApplied);
        assert_eq!(prepared.item.type_id(), ItemId(100006));
        assert_eq!(prepared.slot_ids.len(), 6);
        assert!(!items.contains(ItemId(100006)));
    }

    #[test]
    fn test_forge_registers_item() {
        let (mut items, tags) = make_host();
        let report = forge_item(&mut items, &tags, &ItemConfig::ultra_backpack()).unwrap();

        assert_eq!(report.stage, ForgeStage::Registered);
        assert!(report.stage.is_terminal());
        assert_eq!(report.new_id, ItemId(100006));
        assert_eq!(report.name, "NewItem_100006");
        assert_eq!(report.display_name, "militarybackpack_ultra");
        assert_eq!(report.max_weight, Some(200.0));
        assert_eq!(report.modifier_count, 1);
        assert!(items.is_dynamic(ItemId(100006)));
    }

    #[test]
    fn test_missing_slot_template_rolls_back_nothing_registered() {
        let (mut items, tags) = make_host();
        let settings = ForgeSettings {
            slot_template_id: ItemId(31337),
            ..ForgeSettings::default()
        };
        let forge = Forge::new(settings);

        let result = forge.forge(&mut items, &tags, &ItemConfig::ultra_backpack());

        assert!(matches!(result, Err(ForgeError::SlotPatternUnavailable { .. })));
        assert!(!items.contains(ItemId(100006)));
    }

    #[test]
    fn test_forge_all_parallel_matches_input_order() {
        let (mut items, tags) = make_host();
        let forge = Forge::new(ForgeSettings {
            parallel_threshold: 2,
            ..ForgeSettings::default()
        });
        let configs = vec![
            make_config(40, 200001),
            make_config(999999, 200002),
            make_config(254, 200003),
        ];
        assert!(forge.can_prepare_in_parallel(&configs));

        let results = forge.forge_all(&mut items, &tags, &configs);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().new_id, ItemId(200001));
        assert!(is_lookup_failure(results[1].as_ref().unwrap_err()));
        assert_eq!(results[2].as_ref().unwrap().template_id, ItemId(254));
        assert_eq!(items.dynamic_ids(), vec![ItemId(200001), ItemId(200003)]);
    }

    #[test]
    fn test_forge_all_chained_runs_sequentially() {
        let (mut items, tags) = make_host();
        let forge = Forge::new(ForgeSettings {
            parallel_threshold: 2,
            ..ForgeSettings::default()
        });
        // Second item is templated on the first one's new id
        let configs = vec![make_config(40, 200001), make_config(200001, 200002)];
        assert!(!forge.can_prepare_in_parallel(&configs));

        let results = forge.forge_all(&mut items, &tags, &configs);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(items.contains(ItemId(200002)));
    }

    #[test]
    fn test_forge_all_duplicate_in_batch() {
        let (mut items, tags) = make_host();
        let forge = Forge::new(ForgeSettings {
            parallel_threshold: 2,
            ..ForgeSettings::default()
        });
        let first = make_config(40, 200001);
        let second = ItemConfig {
            value: Some(5),
            slot_count: 2,
            ..make_config(254, 200001)
        };

        let results = forge.forge_all(&mut items, &tags, &[first, second]);

        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(err, ForgeError::RegistrationConflict { .. }));
        assert_eq!(failed_stage(err), ForgeStage::RolledBack);

        // First item's data is what stays registered
        let kept = items.get(ItemId(200001)).unwrap();
        assert_eq!(kept.value(), 1_000_000);
        assert_eq!(kept.slots().len(), 6);
        assert_eq!(items.dynamic_len(), 1);
    }

    #[test]
    fn test_failed_stage_per_error() {
        let (mut items, tags) = make_host();
        let missing = forge_item(&mut items, &tags, &make_config(999999, 200001)).unwrap_err();
        assert_eq!(failed_stage(&missing), ForgeStage::LookedUp);

        let forge = Forge::new(ForgeSettings {
            slot_template_id: ItemId(31337),
            ..ForgeSettings::default()
        });
        assert_eq!(forge.settings().slot_template_id, ItemId(31337));
        let no_pattern = forge
            .forge(&mut items, &tags, &make_config(40, 200001))
            .unwrap_err();
        assert_eq!(failed_stage(&no_pattern), ForgeStage::AttributesPatched);
    }

    #[test]
    fn test_custom_setter_table() {
        let (mut items, tags) = make_host();
        let mut setters = SetterTable::empty();
        setters.field("typeID", |item, name, value| {
            item.type_id = ItemId(value.as_u32(name)?);
            Ok(())
        });
        let forge = Forge::with_setters(ForgeSettings::default(), setters);

        let report = forge
            .forge(&mut items, &tags, &ItemConfig::ultra_backpack())
            .unwrap();

        assert_eq!(report.applied_attributes, vec!["typeID"]);
        assert!(report.unknown_attributes.contains(&"weight".to_string()));
        // Template value survives when no setter exists for it
        assert_eq!(items.get(ItemId(100006)).unwrap().value(), 2800);
    }
}
