use std::sync::{Arc, Mutex};

use crate::setting::error::{Result, SettingError};
use crate::setting::setting::Setting;
use crate::setting::value::SettingValue;

/// Separator used to flatten constraint lists into the display table column.
const CONSTRAINT_SEPARATOR: &str = "|";

/// One row of the primary config table, keyed by (varname, module, shopid).
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfigRow {
    shop_id: u32,
    module: String,
    name: String,
    var_type: String,
    value: String,
}

/// One row of the secondary display table, keyed by (cfgvarname, cfgmodule).
#[derive(Debug, Clone, PartialEq, Eq)]
struct DisplayRow {
    module: String,
    name: String,
    group_name: String,
    position_in_group: i32,
    constraints: String,
}

#[derive(Debug, Default)]
struct Tables {
    config: Vec<ConfigRow>,
    config_display: Vec<DisplayRow>,
}

/// Handle on the two setting tables.
///
/// The relational backend itself is an out-of-scope collaborator; this handle
/// models its table contract, including row identity, so the DAO logic and
/// its duplicate-row guarantees are exercised for real.
#[derive(Debug, Default)]
pub struct SettingsDatabase {
    tables: Mutex<Tables>,
}

impl SettingsDatabase {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Row count in the primary table for one setting key. Test support and
    /// consistency checks; a correct DAO never produces counts above one.
    pub fn config_row_count(&self, name: &str, shop_id: u32, module_key: &str) -> usize {
        self.with_tables(|t| {
            t.config
                .iter()
                .filter(|r| r.name == name && r.shop_id == shop_id && r.module == module_key)
                .count()
        })
    }

    /// Row count in the display table for one setting key.
    pub fn display_row_count(&self, name: &str, module_key: &str) -> usize {
        self.with_tables(|t| {
            t.config_display
                .iter()
                .filter(|r| r.name == name && r.module == module_key)
                .count()
        })
    }

    /// Insert a raw row into the primary config table, bypassing the DAO.
    /// This is how legacy code wrote settings: no display row at all.
    pub fn insert_raw_config_row(
        &self,
        name: &str,
        shop_id: u32,
        module_key: &str,
        var_type: &str,
        value: &str,
    ) {
        self.with_tables(|t| {
            t.config.push(ConfigRow {
                shop_id,
                module: module_key.to_string(),
                name: name.to_string(),
                var_type: var_type.to_string(),
                value: value.to_string(),
            });
        });
    }

    fn with_tables<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut tables)
    }
}

/// Store for typed module settings over the two-table contract.
///
/// Settings are scoped by `(name, module_id, shop_id)`; the module column
/// carries the `module:<moduleId>` prefix the legacy schema uses to separate
/// module settings from shop-wide ones.
#[derive(Debug, Clone)]
pub struct SettingDao {
    database: Arc<SettingsDatabase>,
}

impl SettingDao {
    pub fn new(database: Arc<SettingsDatabase>) -> Self {
        Self { database }
    }

    /// Insert or update the setting under its key. Saving the same key twice
    /// updates in place; neither table ever gains a duplicate row.
    pub fn save(&self, setting: &Setting, module_id: &str, shop_id: u32) {
        let module_key = prefixed_module_id(module_id);
        self.database.with_tables(|t| {
            let row = ConfigRow {
                shop_id,
                module: module_key.clone(),
                name: setting.name().to_string(),
                var_type: setting.type_tag().to_string(),
                value: setting.value().encode(),
            };
            match t.config.iter_mut().find(|r| {
                r.name == setting.name() && r.shop_id == shop_id && r.module == module_key
            }) {
                Some(existing) => *existing = row,
                None => t.config.push(row),
            }

            let display = DisplayRow {
                module: module_key.clone(),
                name: setting.name().to_string(),
                group_name: setting.group_name().to_string(),
                position_in_group: setting.position_in_group(),
                constraints: setting.constraints().join(CONSTRAINT_SEPARATOR),
            };
            match t
                .config_display
                .iter_mut()
                .find(|r| r.name == setting.name() && r.module == module_key)
            {
                Some(existing) => *existing = display,
                None => t.config_display.push(display),
            }
        });
    }

    /// Read the setting under its key.
    ///
    /// The primary table is authoritative: a miss there is [`SettingError::NotFound`].
    /// A missing display row (legacy writers never created one) degrades to an
    /// empty group name, position zero and no constraints.
    pub fn get(&self, name: &str, module_id: &str, shop_id: u32) -> Result<Setting> {
        let module_key = prefixed_module_id(module_id);
        self.database.with_tables(|t| {
            let config_row = t
                .config
                .iter()
                .find(|r| r.name == name && r.shop_id == shop_id && r.module == module_key)
                .cloned()
                .ok_or_else(|| SettingError::NotFound {
                    name: name.to_string(),
                    module_id: module_id.to_string(),
                    shop_id,
                })?;

            let value = SettingValue::decode(&config_row.var_type, &config_row.value)?;
            let mut setting = Setting::new(name, value);

            if let Some(display) = t
                .config_display
                .iter()
                .find(|r| r.name == name && r.module == module_key)
            {
                setting = setting
                    .with_group_name(&display.group_name)
                    .with_position_in_group(display.position_in_group);
                if !display.constraints.is_empty() {
                    setting = setting.with_constraints(
                        display
                            .constraints
                            .split(CONSTRAINT_SEPARATOR)
                            .map(str::to_string)
                            .collect(),
                    );
                }
            }

            Ok(setting)
        })
    }

    /// Remove the setting from both tables. A subsequent `get` is NotFound.
    pub fn delete(&self, setting: &Setting, module_id: &str, shop_id: u32) {
        let module_key = prefixed_module_id(module_id);
        self.database.with_tables(|t| {
            t.config.retain(|r| {
                !(r.name == setting.name() && r.shop_id == shop_id && r.module == module_key)
            });
            t.config_display
                .retain(|r| !(r.name == setting.name() && r.module == module_key));
        });
    }
}

/// Generic config-variable accessor over the raw primary table.
///
/// This is the read path legacy shop code uses; the typed DAO must stay
/// read-compatible with it: the decoded raw value equals `get(..).value()`.
#[derive(Debug, Clone)]
pub struct ShopConfigReader {
    database: Arc<SettingsDatabase>,
}

impl ShopConfigReader {
    pub fn new(database: Arc<SettingsDatabase>) -> Self {
        Self { database }
    }

    /// Decode one raw config variable, addressed by its full module key
    /// (e.g. `module:mymodule`). Missing rows yield `None`.
    pub fn shop_conf_var(
        &self,
        name: &str,
        shop_id: u32,
        module_key: &str,
    ) -> Result<Option<SettingValue>> {
        let row = self.database.with_tables(|t| {
            t.config
                .iter()
                .find(|r| r.name == name && r.shop_id == shop_id && r.module == module_key)
                .cloned()
        });
        match row {
            Some(row) => SettingValue::decode(&row.var_type, &row.value).map(Some),
            None => Ok(None),
        }
    }
}

fn prefixed_module_id(module_id: &str) -> String {
    format!("module:{module_id}")
}
