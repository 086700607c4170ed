use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::module_system::dao::ShopConfigurationDao;
use crate::module_system::error::{ModuleSystemError, Result};

/// Event fired when a module transitions to active.
pub const ON_ACTIVATE_EVENT: &str = "onActivate";
/// Event fired when a module transitions to inactive.
pub const ON_DEACTIVATE_EVENT: &str = "onDeactivate";

/// Orchestrates module state transitions per `(module_id, shop_id)`:
/// `Installed(Inactive) -> Active` and back.
///
/// Both transitions are idempotent: repeating one on a module already in the
/// target state changes nothing and is not an error. Targets without a
/// declaration fail with [`ModuleSystemError::ModuleNotFound`] before any
/// state is touched.
#[async_trait]
pub trait ModuleActivationBridge: Send + Sync {
    async fn activate(&self, module_id: &str, shop_id: u32) -> Result<()>;

    async fn deactivate(&self, module_id: &str, shop_id: u32) -> Result<()>;

    fn is_active(&self, module_id: &str, shop_id: u32) -> bool;
}

/// Default implementation over the persisted shop configuration aggregate.
#[derive(Debug, Clone)]
pub struct DefaultModuleActivationBridge {
    dao: Arc<ShopConfigurationDao>,
}

impl DefaultModuleActivationBridge {
    pub fn new(dao: Arc<ShopConfigurationDao>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl ModuleActivationBridge for DefaultModuleActivationBridge {
    async fn activate(&self, module_id: &str, shop_id: u32) -> Result<()> {
        let mut configuration = self.dao.get(shop_id);
        let module = configuration.module_configuration(module_id).ok_or_else(|| {
            ModuleSystemError::ModuleNotFound {
                module_id: module_id.to_string(),
                shop_id,
            }
        })?;

        if configuration.is_active(module_id) {
            debug!("Module '{module_id}' is already active for shop {shop_id}");
            return Ok(());
        }

        if let Some(handler) = module.event_handler(ON_ACTIVATE_EVENT) {
            debug!("Firing {ON_ACTIVATE_EVENT} handler '{handler}' of module '{module_id}'");
        }

        configuration.activate(module_id);
        self.dao.save(&configuration).await?;
        info!("Module '{module_id}' was activated for shop {shop_id}");
        Ok(())
    }

    async fn deactivate(&self, module_id: &str, shop_id: u32) -> Result<()> {
        let mut configuration = self.dao.get(shop_id);
        let module = configuration.module_configuration(module_id).ok_or_else(|| {
            ModuleSystemError::ModuleNotFound {
                module_id: module_id.to_string(),
                shop_id,
            }
        })?;

        if !configuration.is_active(module_id) {
            debug!("Module '{module_id}' is already inactive for shop {shop_id}");
            return Ok(());
        }

        if let Some(handler) = module.event_handler(ON_DEACTIVATE_EVENT) {
            debug!("Firing {ON_DEACTIVATE_EVENT} handler '{handler}' of module '{module_id}'");
        }

        configuration.deactivate(module_id);
        self.dao.save(&configuration).await?;
        info!("Module '{module_id}' was deactivated for shop {shop_id}");
        Ok(())
    }

    fn is_active(&self, module_id: &str, shop_id: u32) -> bool {
        self.dao.get(shop_id).is_active(module_id)
    }
}
