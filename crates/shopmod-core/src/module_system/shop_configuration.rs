use serde::{Deserialize, Serialize};

use crate::module_system::configuration::ModuleConfiguration;

/// Aggregate of everything module-related one shop persists: the declared
/// module configurations in declaration order and the ids of active modules
/// in activation order.
///
/// Activation order is significant: it drives extension-merge order and
/// Smarty plugin directory precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfiguration {
    shop_id: u32,
    #[serde(default)]
    module_configurations: Vec<ModuleConfiguration>,
    #[serde(default)]
    active_modules: Vec<String>,
}

impl ShopConfiguration {
    pub fn new(shop_id: u32) -> Self {
        Self {
            shop_id,
            module_configurations: Vec::new(),
            active_modules: Vec::new(),
        }
    }

    pub fn shop_id(&self) -> u32 {
        self.shop_id
    }

    /// Append a module configuration, or replace the existing declaration
    /// with the same id in place (keeping its declaration position).
    /// Does not persist; that is the DAO's job.
    pub fn add_module_configuration(&mut self, configuration: ModuleConfiguration) {
        match self
            .module_configurations
            .iter_mut()
            .find(|c| c.id() == configuration.id())
        {
            Some(existing) => *existing = configuration,
            None => self.module_configurations.push(configuration),
        }
    }

    pub fn module_configuration(&self, module_id: &str) -> Option<&ModuleConfiguration> {
        self.module_configurations
            .iter()
            .find(|c| c.id() == module_id)
    }

    pub fn has_module_configuration(&self, module_id: &str) -> bool {
        self.module_configuration(module_id).is_some()
    }

    /// All declared module configurations, declaration order.
    pub fn module_configurations(&self) -> &[ModuleConfiguration] {
        &self.module_configurations
    }

    /// All declared module ids, declaration order.
    pub fn module_ids(&self) -> Vec<String> {
        self.module_configurations
            .iter()
            .map(|c| c.id().to_string())
            .collect()
    }

    /// Active module ids, activation order.
    pub fn active_modules(&self) -> &[String] {
        &self.active_modules
    }

    pub fn is_active(&self, module_id: &str) -> bool {
        self.active_modules.iter().any(|id| id == module_id)
    }

    /// Append the module to the active list. Activating an already-active
    /// module is a no-op: the list never holds duplicates and the original
    /// activation position is kept.
    pub fn activate(&mut self, module_id: &str) {
        if !self.is_active(module_id) {
            self.active_modules.push(module_id.to_string());
        }
    }

    /// Remove the module from the active list; a no-op when inactive.
    pub fn deactivate(&mut self, module_id: &str) {
        self.active_modules.retain(|id| id != module_id);
    }
}
