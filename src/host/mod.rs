//! Host application stand-in
//!
//! Owns the item and tag registries plus localized text, and drives the
//! mods' after-setup hook exactly once.

pub mod forge_mod;
pub mod localization;

pub use forge_mod::{ForgeMod, ForgeRun};
pub use localization::Localization;

use crate::core::error::{ForgeError, Result};
use crate::registry::{Catalog, ItemRegistry, TagRegistry};

/// A mod loaded into the host
pub trait ModBehaviour {
    fn name(&self) -> &str;

    /// Called once, after the host has finished its own setup
    fn on_after_setup(&mut self, host: &mut Host);
}

pub struct Host {
    items: ItemRegistry,
    tags: TagRegistry,
    localization: Localization,
    setup_complete: bool,
}

impl Host {
    pub fn new(items: ItemRegistry, tags: TagRegistry) -> Self {
        Self {
            items,
            tags,
            localization: Localization::new(),
            setup_complete: false,
        }
    }

    /// Build a host from a catalog
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let (items, tags) = catalog.build()?;
        Ok(Self::new(items, tags))
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    pub fn localization_mut(&mut self) -> &mut Localization {
        &mut self.localization
    }

    /// Mutable item registry alongside the read-only tag set
    pub fn registries_mut(&mut self) -> (&mut ItemRegistry, &TagRegistry) {
        (&mut self.items, &self.tags)
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete
    }

    /// Finish host setup and run each mod's after-setup hook, in order.
    ///
    /// Fails if setup has already run; no hook is called twice.
    pub fn run_setup(&mut self, mods: &mut [&mut dyn ModBehaviour]) -> Result<()> {
        if self.setup_complete {
            return Err(ForgeError::SetupAlreadyRun);
        }
        self.setup_complete = true;

        for m in mods.iter_mut() {
            tracing::info!("Running after-setup hook for {}", m.name());
            m.on_after_setup(self);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::ForgeStage;

    struct CountingMod {
        calls: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl ModBehaviour for CountingMod {
        fn name(&self) -> &str {
            "counting"
        }

        fn on_after_setup(&mut self, host: &mut Host) {
            assert!(host.is_setup_complete());
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn test_hook_runs_exactly_once() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut host = Host::from_catalog(&Catalog::builtin()).unwrap();
        let mut counting = CountingMod {
            calls: calls.clone(),
        };

        host.run_setup(&mut [&mut counting]).unwrap();
        assert!(matches!(
            host.run_setup(&mut [&mut counting]),
            Err(ForgeError::SetupAlreadyRun)
        ));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_forge_mod_writes_localization() {
        let mut host = Host::from_catalog(&Catalog::builtin()).unwrap();
        let mut forge_mod = ForgeMod::default();
        host.run_setup(&mut [&mut forge_mod]).unwrap();

        assert_eq!(forge_mod.reports().len(), 1);
        assert_eq!(forge_mod.runs()[0].stage(), ForgeStage::Registered);

        assert_eq!(
            host.localization().get("militarybackpack_ultra"),
            Some("Military Backpack ULTRA")
        );
        assert!(host
            .localization()
            .get("militarybackpack_ultra_Desc")
            .is_some());
    }

    #[test]
    fn test_forge_mod_failure_writes_nothing() {
        let mut config = crate::core::config::ForgeConfig::default();
        config.items[0].template_id = crate::core::types::ItemId(999999);

        let mut host = Host::from_catalog(&Catalog::builtin()).unwrap();
        let mut forge_mod = ForgeMod::new(config);
        forge_mod.on_after_setup(&mut host);

        assert_eq!(forge_mod.failures().len(), 1);
        assert_eq!(forge_mod.runs()[0].stage(), ForgeStage::LookedUp);
        assert!(forge_mod.reports().is_empty());
        assert!(host.localization().is_empty());
        assert_eq!(host.items().dynamic_len(), 0);
    }
}
