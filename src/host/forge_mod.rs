//! The mod that forges configured items once the host is set up

use super::{Host, ModBehaviour};
use crate::core::config::ForgeConfig;
use crate::core::error::{ForgeError, Result};
use crate::core::types::ItemId;
use crate::forge::{failed_stage, Forge, ForgeReport, ForgeStage};

/// Outcome of one configured item
#[derive(Debug)]
pub struct ForgeRun {
    pub new_id: ItemId,
    pub display_name: String,
    pub result: Result<ForgeReport>,
}

impl ForgeRun {
    /// Stage the run ended in
    pub fn stage(&self) -> ForgeStage {
        match &self.result {
            Ok(report) => report.stage,
            Err(e) => failed_stage(e),
        }
    }
}

pub struct ForgeMod {
    config: ForgeConfig,
    forge: Forge,
    runs: Vec<ForgeRun>,
}

impl ForgeMod {
    pub fn new(config: ForgeConfig) -> Self {
        let forge = Forge::new(config.settings.clone());
        Self {
            config,
            forge,
            runs: Vec::new(),
        }
    }

    /// Results of the last setup, in configuration order
    pub fn runs(&self) -> &[ForgeRun] {
        &self.runs
    }

    pub fn reports(&self) -> Vec<&ForgeReport> {
        self.runs.iter().filter_map(|r| r.result.as_ref().ok()).collect()
    }

    pub fn failures(&self) -> Vec<(ItemId, &ForgeError)> {
        self.runs
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (r.new_id, e)))
            .collect()
    }
}

impl Default for ForgeMod {
    fn default() -> Self {
        Self::new(ForgeConfig::default())
    }
}

impl ModBehaviour for ForgeMod {
    fn name(&self) -> &str {
        "item-forge"
    }

    fn on_after_setup(&mut self, host: &mut Host) {
        tracing::info!("Forging {} configured item(s)", self.config.items.len());

        let results = {
            let (registry, tags) = host.registries_mut();
            self.forge.forge_all(registry, tags, &self.config.items)
        };

        self.runs = self
            .config
            .items
            .iter()
            .zip(results)
            .map(|(item, result)| {
                match &result {
                    Ok(report) => {
                        host.localization_mut()
                            .set_text(item.localization_key.clone(), item.display_name.clone());
                        host.localization_mut()
                            .set_text(item.localization_desc_key(), item.description.clone());
                        tracing::info!(
                            "{} created: id {}, {} slots",
                            item.display_name,
                            report.new_id,
                            report.slot_ids.len()
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "{} was not created ({:?}): {}",
                            item.display_name,
                            failed_stage(e),
                            e
                        );
                    }
                }
                ForgeRun {
                    new_id: item.new_id,
                    display_name: item.display_name.clone(),
                    result,
                }
            })
            .collect();

        tracing::info!(
            "Forging finished: {} created, {} failed",
            self.reports().len(),
            self.failures().len()
        );
    }
}
