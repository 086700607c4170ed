pub mod module_system;
pub mod setting;
pub mod shop;
pub mod storage;

// Re-export key public types for the binary and embedding applications.
pub use module_system::{
    DefaultModuleActivationBridge, ModuleActivationBridge, ModuleConfiguration, ModuleList,
    ModuleStateService, ModuleSystemError, ShopConfiguration, ShopConfigurationDao,
};
pub use setting::{Setting, SettingDao, SettingValue};
pub use shop::ShopContext;
pub use storage::{FileLockRegistry, FileStorageProvider, LocalStorageProvider, YamlFileStorage};
