//! Error types for the module setting store.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingError {
    #[error("Setting '{name}' does not exist for module '{module_id}' in shop {shop_id}")]
    NotFound {
        name: String,
        module_id: String,
        shop_id: u32,
    },

    #[error("Stored value with type tag '{tag}' could not be decoded: {message}")]
    InvalidValue { tag: String, message: String },
}

/// Shorthand for Result with the setting error type
pub type Result<T> = std::result::Result<T, SettingError>;
