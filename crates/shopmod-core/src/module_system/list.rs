use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::module_system::configuration::ClassExtensions;
use crate::module_system::dao::ShopConfigurationDao;
use crate::module_system::error::Result;
use crate::module_system::shop_configuration::ShopConfiguration;
use crate::shop::context::ShopContext;

/// Separator of the legacy flat extension-chain format.
const LEGACY_CHAIN_SEPARATOR: &str = "&";

/// Filesystem-existence predicate consulted for deleted-extension detection.
/// This is the only filesystem dependency of the activation engine.
pub trait PathExists: Send + Sync + Debug {
    fn exists(&self, path: &Path) -> bool;
}

/// Production checker backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalFileChecker;

impl PathExists for LocalFileChecker {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// One entry of the deleted-extension report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletedModuleEntry {
    /// Extension targets whose backing class files vanished from disk,
    /// keyed by extended class.
    Extensions(ClassExtensions),
    /// Module files that are missing altogether. Reported for a module
    /// without any metadata that a legacy extension entry still references:
    /// its own `metadata.php` is the missing file.
    Files(Vec<String>),
}

/// Activation-dependent views over one shop's module configuration.
///
/// The list loads the aggregate once at construction (request-scoped, like
/// every consumer of the configuration) and derives merged extension chains,
/// disabled-module info and the deleted-extension report from it.
#[derive(Debug)]
pub struct ModuleList {
    configuration: ShopConfiguration,
    dao: Arc<ShopConfigurationDao>,
    modules_dir: PathBuf,
    checker: Arc<dyn PathExists>,
    /// The old flat `extended class => chain&chain` registry. Entries here
    /// may reference modules that no longer carry metadata; those show up in
    /// the deleted-extension report.
    legacy_extensions: IndexMap<String, String>,
}

impl ModuleList {
    pub fn new(
        dao: Arc<ShopConfigurationDao>,
        context: &ShopContext,
        checker: Arc<dyn PathExists>,
    ) -> Self {
        let configuration = dao.get(context.shop_id());
        Self {
            configuration,
            dao,
            modules_dir: context.modules_dir().to_path_buf(),
            checker,
            legacy_extensions: IndexMap::new(),
        }
    }

    /// Supply the legacy flat extension registry for stale-reference checks.
    pub fn with_legacy_extensions(mut self, legacy_extensions: IndexMap<String, String>) -> Self {
        self.legacy_extensions = legacy_extensions;
        self
    }

    pub fn configuration(&self) -> &ShopConfiguration {
        &self.configuration
    }

    /// All declared module ids, declaration order.
    pub fn module_ids(&self) -> Vec<String> {
        self.configuration.module_ids()
    }

    /// Declared but not activated module ids, declaration order.
    pub fn disabled_modules(&self) -> Vec<String> {
        self.configuration
            .module_configurations()
            .iter()
            .filter(|c| !self.configuration.is_active(c.id()))
            .map(|c| c.id().to_string())
            .collect()
    }

    /// Module id to path, disabled modules only.
    pub fn disabled_module_info(&self) -> IndexMap<String, String> {
        self.configuration
            .module_configurations()
            .iter()
            .filter(|c| !self.configuration.is_active(c.id()))
            .map(|c| (c.id().to_string(), c.path().to_string()))
            .collect()
    }

    /// Extension targets declared by disabled modules, used to detect
    /// overrides that dangle once their module is switched off.
    pub fn disabled_module_classes(&self) -> Vec<String> {
        let mut classes = Vec::new();
        for configuration in self.configuration.module_configurations() {
            if self.configuration.is_active(configuration.id()) {
                continue;
            }
            for chain in configuration.extensions().values() {
                classes.extend(chain.iter().cloned());
            }
        }
        classes
    }

    /// Module id to path for every declared module.
    pub fn extract_module_paths(&self) -> IndexMap<String, String> {
        self.configuration
            .module_configurations()
            .iter()
            .map(|c| (c.id().to_string(), c.path().to_string()))
            .collect()
    }

    /// The extension map one module declares, declared order. Empty for
    /// unknown modules and modules without metadata.
    pub fn module_extensions(&self, module_id: &str) -> ClassExtensions {
        self.configuration
            .module_configuration(module_id)
            .map(|c| c.extensions().clone())
            .unwrap_or_default()
    }

    /// Merged extension chains across all active modules.
    ///
    /// Merge order is activation order, and within one module the declared
    /// order; chains of two modules extending the same class concatenate.
    pub fn modules_with_extended_class(&self) -> ClassExtensions {
        let mut merged = ClassExtensions::new();
        for module_id in self.configuration.active_modules() {
            let Some(configuration) = self.configuration.module_configuration(module_id) else {
                continue;
            };
            for (extended_class, chain) in configuration.extensions() {
                merged
                    .entry(extended_class.clone())
                    .or_default()
                    .extend(chain.iter().cloned());
            }
        }
        merged
    }

    /// The same merge flattened into the legacy format: one `&`-separated
    /// string per extended class.
    pub fn modules(&self) -> IndexMap<String, String> {
        self.modules_with_extended_class()
            .into_iter()
            .map(|(extended_class, chain)| (extended_class, chain.join(LEGACY_CHAIN_SEPARATOR)))
            .collect()
    }

    /// Report every active module whose declared extensions point at files
    /// that no longer exist on disk.
    ///
    /// A module without metadata contributes no extensions and is normally
    /// skipped; it is reported with a missing `metadata.php` only when a
    /// legacy extension entry still references it.
    pub fn deleted_extensions(&self) -> IndexMap<String, DeletedModuleEntry> {
        let mut report = IndexMap::new();

        for module_id in self.configuration.active_modules() {
            let Some(configuration) = self.configuration.module_configuration(module_id) else {
                continue;
            };

            if !configuration.has_extensions() {
                if self.is_referenced_by_legacy_extension(module_id) {
                    report.insert(
                        module_id.clone(),
                        DeletedModuleEntry::Files(vec![format!("{module_id}/metadata.php")]),
                    );
                }
                continue;
            }

            let mut missing = ClassExtensions::new();
            for (extended_class, chain) in configuration.extensions() {
                for extending_class in chain {
                    if !self
                        .checker
                        .exists(&self.extension_file_path(extending_class))
                    {
                        missing
                            .entry(extended_class.clone())
                            .or_default()
                            .push(extending_class.clone());
                    }
                }
            }
            if !missing.is_empty() {
                report.insert(module_id.clone(), DeletedModuleEntry::Extensions(missing));
            }
        }

        report
    }

    /// Deactivate every module the deleted-extension report names and persist
    /// the result. Idempotent: with nothing stale, the active-module set is
    /// untouched and nothing is written.
    pub async fn cleanup(&mut self) -> Result<()> {
        let stale: Vec<String> = self.deleted_extensions().keys().cloned().collect();
        if stale.is_empty() {
            return Ok(());
        }

        for module_id in &stale {
            log::info!(
                "Deactivating stale module registration '{module_id}' for shop {}",
                self.configuration.shop_id()
            );
            self.configuration.deactivate(module_id);
        }
        self.dao.save(&self.configuration).await?;
        Ok(())
    }

    fn is_referenced_by_legacy_extension(&self, module_id: &str) -> bool {
        let prefix = format!("{module_id}/");
        self.legacy_extensions.values().any(|chain| {
            chain
                .split(LEGACY_CHAIN_SEPARATOR)
                .any(|extending| extending.starts_with(&prefix))
        })
    }

    /// Resolve the backing file of an extending class below the modules root.
    /// Namespace separators are treated as path separators; module classes
    /// keep their legacy `.php` suffix on disk.
    fn extension_file_path(&self, extending_class: &str) -> PathBuf {
        let relative = extending_class.replace('\\', "/");
        self.modules_dir.join(format!("{relative}.php"))
    }
}
