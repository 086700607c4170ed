//! # Module System
//!
//! The module configuration and activation engine: which optional modules a
//! shop has installed, which are active, how their class extensions merge,
//! and how all of it is persisted.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`configuration`]**: the static declaration of one module
//!   ([`ModuleConfiguration`]): extensions, templates, blocks, Smarty plugin
//!   directories and event handlers.
//! - **[`shop_configuration`]**: the per-shop aggregate ([`ShopConfiguration`])
//!   of declared modules and the activation-ordered active-module list.
//! - **[`dao`]**: YAML persistence of the aggregate with locked atomic writes.
//! - **[`list`]**: the activation engine ([`ModuleList`]): merged extension
//!   chains, disabled-module views, deleted-extension detection and cleanup.
//! - **[`activation`]**: the idempotent activate/deactivate bridge.
//! - **[`state`]**: pure activation-state queries.
//! - **[`smarty`]**: Smarty plugin directory precedence resolution.
//! - **[`error`]**: typed module system errors.
pub mod configuration;
pub mod shop_configuration;
pub mod dao;
pub mod list;
pub mod activation;
pub mod state;
pub mod smarty;
pub mod error;

pub use configuration::{ClassExtensions, EventHandlers, ModuleConfiguration, TemplateBlock};
pub use shop_configuration::ShopConfiguration;
pub use dao::ShopConfigurationDao;
pub use list::{DeletedModuleEntry, LocalFileChecker, ModuleList, PathExists};
pub use activation::{DefaultModuleActivationBridge, ModuleActivationBridge};
pub use state::ModuleStateService;
pub use smarty::SmartyPluginDirectoriesResolver;
pub use error::ModuleSystemError;

// Test module declaration
#[cfg(test)]
mod tests;
