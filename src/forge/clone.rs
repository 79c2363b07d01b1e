//! Template lookup and clone

use crate::core::error::{ForgeError, Result};
use crate::core::types::ItemId;
use crate::item::Item;
use crate::registry::TemplateSource;

/// Object name given to a forged item
pub fn forged_name(new_id: ItemId) -> String {
    format!("NewItem_{}", new_id)
}

/// Look up `template_id` and return an owned deep copy named after `new_id`.
///
/// The template itself is only borrowed for the duration of the copy.
pub fn clone_template<R: TemplateSource + ?Sized>(
    templates: &R,
    template_id: ItemId,
    new_id: ItemId,
) -> Result<Item> {
    let template = templates
        .get_prefab(template_id)
        .ok_or(ForgeError::TemplateNotFound(template_id))?;

    let mut item = template.clone();
    item.set_name(forged_name(new_id));

    tracing::debug!(
        "Cloned template {} ({}) as {}",
        template_id,
        template.name(),
        item.name()
    );
    Ok(item)
}
