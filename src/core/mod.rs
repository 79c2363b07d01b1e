pub mod config;
pub mod error;
pub mod types;

pub use config::{ForgeConfig, ForgeSettings, ItemConfig};
pub use error::{ForgeError, Result};
