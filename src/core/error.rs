use thiserror::Error;

use crate::core::types::ItemId;
use crate::registry::RejectReason;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Template not found: {0}")]
    TemplateNotFound(ItemId),

    #[error("Registration of {id} failed: {reason}")]
    RegistrationConflict { id: ItemId, reason: RejectReason },

    #[error("Slot pattern unavailable on template {template}: {detail}")]
    SlotPatternUnavailable { template: ItemId, detail: String },

    #[error("Host setup has already run")]
    SetupAlreadyRun,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
