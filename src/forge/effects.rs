//! Modifier replacement

use crate::item::{Item, ModifierDescription};

/// Discard the item's modifiers, install `modifiers`, and reapply.
pub fn replace_modifiers(item: &mut Item, modifiers: &[ModifierDescription]) {
    let collection = item.modifiers_mut();
    collection.clear();
    for modifier in modifiers {
        tracing::debug!(
            "Adding modifier {} {:+}{}",
            modifier.key,
            modifier.value,
            if modifier.is_percentage { "%" } else { "" }
        );
        collection.add(modifier.clone());
    }
    item.reapply_modifiers();
}
