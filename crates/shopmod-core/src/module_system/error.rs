//! # Module System Errors
//!
//! Defines error types specific to the module configuration and
//! activation engine.
use thiserror::Error;

use crate::storage::error::StorageSystemError;

#[derive(Debug, Error)]
pub enum ModuleSystemError {
    /// The activation or deactivation target has no declaration in the shop
    /// configuration. Never retried; no partial state is left behind.
    #[error("Module '{module_id}' is not declared for shop {shop_id}")]
    ModuleNotFound { module_id: String, shop_id: u32 },

    #[error("Storage system error: {0}")]
    Storage(#[from] StorageSystemError),
}

/// Shorthand for Result with the module system error type
pub type Result<T> = std::result::Result<T, ModuleSystemError>;
