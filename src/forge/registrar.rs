//! Publishing forged items, with rollback on refusal

use crate::core::error::{ForgeError, Result};
use crate::core::types::ItemId;
use crate::item::Item;
use crate::registry::{DynamicRegistry, RejectedEntry};

/// Hand `item` to the registry under its own type id.
///
/// On refusal the item is released here and the registry is left as it was.
pub fn register<R: DynamicRegistry + ?Sized>(registry: &mut R, item: Item) -> Result<ItemId> {
    let id = item.type_id();
    match registry.add_dynamic_entry(item) {
        Ok(()) => {
            tracing::info!("Registered new item {}", id);
            Ok(id)
        }
        Err(RejectedEntry { item, reason }) => {
            tracing::error!("Registration of {} failed: {}", id, reason);
            tracing::debug!("Releasing rejected clone {}", item.name());
            drop(item);
            Err(ForgeError::RegistrationConflict { id, reason })
        }
    }
}
