use std::path::{Path, PathBuf};

/// Explicit configuration context for one shop.
///
/// Replaces ambient global configuration state: a context is created once at
/// request (or process) start and passed by reference to every component
/// constructor that needs shop-scoped paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopContext {
    shop_id: u32,
    config_dir: PathBuf,
    modules_dir: PathBuf,
}

impl ShopContext {
    pub fn new(shop_id: u32, config_dir: PathBuf, modules_dir: PathBuf) -> Self {
        Self {
            shop_id,
            config_dir,
            modules_dir,
        }
    }

    /// Convention-based context under a single base directory:
    /// `<base>/config` and `<base>/modules`.
    pub fn from_base_dir(shop_id: u32, base_dir: &Path) -> Self {
        Self::new(shop_id, base_dir.join("config"), base_dir.join("modules"))
    }

    pub fn shop_id(&self) -> u32 {
        self.shop_id
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }
}
