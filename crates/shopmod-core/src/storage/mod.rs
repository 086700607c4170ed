//! # Storage System
//!
//! File-based persistence for shop and module configuration.
//!
//! - [`provider`]: the [`FileStorageProvider`] trait every backend implements.
//! - [`local`]: the std::fs backed provider with atomic-replace writes.
//! - [`lock`]: per-resource mutual exclusion for configuration writers.
//! - [`yaml`]: the structured YAML file storage used by the configuration DAOs.
//! - [`error`]: typed storage errors carrying operation and path context.
pub mod provider;
pub mod local;
pub mod lock;
pub mod yaml;
pub mod error;

/// Re-export key types
pub use provider::FileStorageProvider;
pub use local::LocalStorageProvider;
pub use lock::FileLockRegistry;
pub use yaml::YamlFileStorage;
pub use error::StorageSystemError;

// Test module declaration
#[cfg(test)]
mod tests;
