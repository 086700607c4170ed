//! # Module Setting Store
//!
//! Typed per-module settings persisted over the legacy two-table contract:
//! a primary config table keyed by `(varname, module, shopid)` holding the
//! type tag and encoded value, and a secondary display table keyed by
//! `(cfgvarname, cfgmodule)` holding grouping, ordering and constraints.
//!
//! - [`value`]: the tagged [`SettingValue`] with its per-tag wire encoding.
//! - [`setting`]: the [`Setting`] entity.
//! - [`dao`]: the [`SettingDao`] insert-or-update store and the
//!   backward-compatible [`ShopConfigReader`].
//! - [`error`]: typed lookup and decode errors.
pub mod value;
pub mod setting;
pub mod dao;
pub mod error;

pub use value::SettingValue;
pub use setting::Setting;
pub use dao::{SettingDao, SettingsDatabase, ShopConfigReader};
pub use error::SettingError;
