//! Item Forge - derive new items from registered templates at runtime

pub mod core;
pub mod forge;
pub mod host;
pub mod item;
pub mod patch;
pub mod registry;
