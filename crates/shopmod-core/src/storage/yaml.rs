use std::path::PathBuf;
use std::sync::Arc;

use serde_yaml::Value;

use crate::storage::error::{Result, StorageSystemError};
use crate::storage::lock::FileLockRegistry;
use crate::storage::provider::FileStorageProvider;

/// Human-editable YAML storage for one structured configuration file.
///
/// Reads are unlocked; writes serialize the full payload first, then take the
/// per-resource lock and atomically replace the file through the provider.
#[derive(Debug, Clone)]
pub struct YamlFileStorage {
    provider: Arc<dyn FileStorageProvider>,
    file_path: PathBuf,
    locks: Arc<FileLockRegistry>,
}

impl YamlFileStorage {
    pub fn new(
        provider: Arc<dyn FileStorageProvider>,
        file_path: PathBuf,
        locks: Arc<FileLockRegistry>,
    ) -> Self {
        Self {
            provider,
            file_path,
            locks,
        }
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Read the stored mapping. A missing file yields [`Value::Null`];
    /// callers decide how to default it.
    pub fn get(&self) -> Result<Value> {
        if !self.provider.exists(&self.file_path) {
            return Ok(Value::Null);
        }

        let content = self.provider.read_to_string(&self.file_path)?;
        serde_yaml::from_str(&content).map_err(|e| StorageSystemError::DeserializationError {
            format: "yaml".to_string(),
            source: Box::new(e),
        })
    }

    /// Write the full mapping, creating the file and its parent directory on
    /// first save. The lock guards against interleaved writers of the same
    /// resource; the atomic replace in the provider guards readers.
    pub async fn save(&self, data: &Value) -> Result<()> {
        let payload =
            serde_yaml::to_string(data).map_err(|e| StorageSystemError::SerializationError {
                format: "yaml".to_string(),
                source: Box::new(e),
            })?;

        let lock = self.locks.lock_for(&self.file_path);
        let _guard = lock.lock().await;
        self.provider.write_string(&self.file_path, &payload)
    }
}
