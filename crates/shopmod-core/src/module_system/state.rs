use std::sync::Arc;

use crate::module_system::dao::ShopConfigurationDao;

/// Pure queries over the persisted module activation state.
#[derive(Debug, Clone)]
pub struct ModuleStateService {
    dao: Arc<ShopConfigurationDao>,
}

impl ModuleStateService {
    pub fn new(dao: Arc<ShopConfigurationDao>) -> Self {
        Self { dao }
    }

    pub fn is_active(&self, module_id: &str, shop_id: u32) -> bool {
        self.dao.get(shop_id).is_active(module_id)
    }
}
