//! Tag and slot replacement
//!
//! Both collections are cleared and rebuilt from scratch; nothing the
//! template carried survives.

use serde::Serialize;

use crate::core::error::{ForgeError, Result};
use crate::core::types::{IconRef, ItemId};
use crate::item::{Item, Slot};
use crate::registry::{TagSource, TemplateSource};

/// Which requested tags were found
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagReport {
    pub resolved: Vec<String>,
    pub missing: Vec<String>,
}

/// Replace the item's tags with the named ones, in order.
///
/// Names the tag source does not know are skipped.
pub fn replace_tags<T: TagSource + ?Sized>(item: &mut Item, tags: &T, names: &[String]) -> TagReport {
    let mut report = TagReport::default();
    let item_tags = item.tags_mut();
    item_tags.clear();

    for name in names {
        match tags.find_by_name(name) {
            Some(tag) => {
                item_tags.push(tag);
                report.resolved.push(name.clone());
            }
            None => {
                tracing::debug!("Tag '{}' not found, skipping", name);
                report.missing.push(name.clone());
            }
        }
    }

    report
}

/// Kind and icon every new slot is built with
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPattern {
    pub kind: String,
    pub icon: Option<IconRef>,
}

impl SlotPattern {
    /// Take the pattern from the first slot of a template
    pub fn from_template<R: TemplateSource + ?Sized>(templates: &R, template_id: ItemId) -> Result<Self> {
        let template = templates.get_prefab(template_id).ok_or_else(|| {
            ForgeError::SlotPatternUnavailable {
                template: template_id,
                detail: "template not registered".to_string(),
            }
        })?;
        let slot = template
            .slots()
            .first()
            .ok_or_else(|| ForgeError::SlotPatternUnavailable {
                template: template_id,
                detail: "template has no slots".to_string(),
            })?;

        Ok(Self {
            kind: slot.kind.clone(),
            icon: slot.icon.clone(),
        })
    }
}

/// Slot id for position `index`
pub fn slot_id(prefix: &str, index: usize) -> String {
    format!("{}_{}", prefix, index)
}

/// Replace the item's slots with `count` fresh slots built from `pattern`.
///
/// Ids are `<prefix>_0 .. <prefix>_{count-1}`, unique within the item.
/// Returns the new ids.
pub fn replace_slots(item: &mut Item, pattern: &SlotPattern, prefix: &str, count: usize) -> Vec<String> {
    let slots = item.slots_mut();
    slots.clear();

    for index in 0..count {
        let slot = Slot::new(slot_id(prefix, index), pattern.kind.clone())
            .with_icon(pattern.icon.clone());
        slots.add(slot);
    }

    tracing::debug!("Configured {} slots on {}", count, item.name());
    item.slots().ids()
}
