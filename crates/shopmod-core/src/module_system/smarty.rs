use std::path::PathBuf;

use crate::module_system::shop_configuration::ShopConfiguration;
use crate::shop::context::ShopContext;

/// Resolves the Smarty plugin directory search order for one shop.
///
/// Module-declared directories take precedence over the shop-core ones:
/// active modules contribute theirs in activation order (declared order
/// within one module), the shop's own plugin directories follow.
#[derive(Debug, Clone)]
pub struct SmartyPluginDirectoriesResolver {
    modules_dir: PathBuf,
    shop_plugin_directories: Vec<PathBuf>,
}

impl SmartyPluginDirectoriesResolver {
    pub fn new(context: &ShopContext, shop_plugin_directories: Vec<PathBuf>) -> Self {
        Self {
            modules_dir: context.modules_dir().to_path_buf(),
            shop_plugin_directories,
        }
    }

    pub fn resolve(&self, configuration: &ShopConfiguration) -> Vec<PathBuf> {
        let mut directories = Vec::new();

        for module_id in configuration.active_modules() {
            let Some(module) = configuration.module_configuration(module_id) else {
                continue;
            };
            for directory in module.smarty_plugin_directories() {
                directories.push(self.modules_dir.join(module.path()).join(directory));
            }
        }

        directories.extend(self.shop_plugin_directories.iter().cloned());
        directories
    }
}
