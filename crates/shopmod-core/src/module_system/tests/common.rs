use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use crate::module_system::dao::ShopConfigurationDao;
use crate::shop::context::ShopContext;
use crate::storage::local::LocalStorageProvider;
use crate::storage::lock::FileLockRegistry;
use crate::storage::provider::FileStorageProvider;

/// One isolated shop environment: context, DAO and the backing temp dir.
/// The temp dir must stay alive for the duration of the test.
pub fn shop_environment(shop_id: u32) -> (TempDir, ShopContext, Arc<ShopConfigurationDao>) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let context = ShopContext::from_base_dir(shop_id, temp_dir.path());

    let provider: Arc<dyn FileStorageProvider> =
        Arc::new(LocalStorageProvider::new(temp_dir.path().to_path_buf()));
    let dao = Arc::new(ShopConfigurationDao::new(
        provider,
        Arc::new(FileLockRegistry::new()),
        context.config_dir(),
    ));

    (temp_dir, context, dao)
}

/// Create an (empty) module class file below the modules root so the
/// file-existence checker finds it.
pub fn create_module_file(context: &ShopContext, relative: &str) {
    let path = context.modules_dir().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create module directory");
    }
    fs::write(&path, "").expect("Failed to create module file");
}

/// Remove a previously created module class file.
pub fn remove_module_file(context: &ShopContext, relative: &str) {
    let path = context.modules_dir().join(relative);
    if Path::new(&path).exists() {
        fs::remove_file(&path).expect("Failed to remove module file");
    }
}
