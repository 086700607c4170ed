use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;

use crate::module_system::shop_configuration::ShopConfiguration;
use crate::storage::error::Result as StorageResult;
use crate::storage::lock::FileLockRegistry;
use crate::storage::provider::FileStorageProvider;
use crate::storage::yaml::YamlFileStorage;

/// Persists the [`ShopConfiguration`] aggregate as one human-editable YAML
/// file per shop under `<config_dir>/shops/<shop_id>.yaml`.
///
/// Reads never fail the caller: a missing or unreadable file degrades to the
/// empty configuration ("no modules configured") with a warning. Writes go
/// through the locked, atomic [`YamlFileStorage`].
#[derive(Debug, Clone)]
pub struct ShopConfigurationDao {
    provider: Arc<dyn FileStorageProvider>,
    locks: Arc<FileLockRegistry>,
    config_dir: PathBuf,
}

impl ShopConfigurationDao {
    pub fn new(
        provider: Arc<dyn FileStorageProvider>,
        locks: Arc<FileLockRegistry>,
        config_dir: &Path,
    ) -> Self {
        Self {
            provider,
            locks,
            config_dir: config_dir.to_path_buf(),
        }
    }

    /// Load the aggregate for one shop.
    pub fn get(&self, shop_id: u32) -> ShopConfiguration {
        let storage = self.storage_for(shop_id);
        let value = match storage.get() {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    "Shop configuration file {} is unreadable, falling back to empty configuration: {error}",
                    storage.file_path().display()
                );
                return ShopConfiguration::new(shop_id);
            }
        };

        if value.is_null() {
            return ShopConfiguration::new(shop_id);
        }

        match serde_yaml::from_value(value) {
            Ok(configuration) => configuration,
            Err(error) => {
                warn!(
                    "Shop configuration file {} is malformed, falling back to empty configuration: {error}",
                    storage.file_path().display()
                );
                ShopConfiguration::new(shop_id)
            }
        }
    }

    /// Persist the aggregate, creating the file and its parent directory on
    /// first save.
    pub async fn save(&self, configuration: &ShopConfiguration) -> StorageResult<()> {
        let storage = self.storage_for(configuration.shop_id());
        let value = serde_yaml::to_value(configuration).map_err(|e| {
            crate::storage::error::StorageSystemError::SerializationError {
                format: "yaml".to_string(),
                source: Box::new(e),
            }
        })?;
        storage.save(&value).await
    }

    fn storage_for(&self, shop_id: u32) -> YamlFileStorage {
        let file_path = self
            .config_dir
            .join("shops")
            .join(format!("{shop_id}.yaml"));
        YamlFileStorage::new(self.provider.clone(), file_path, self.locks.clone())
    }
}
