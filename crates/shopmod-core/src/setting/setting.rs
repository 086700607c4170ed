use serde::{Deserialize, Serialize};

use crate::setting::value::SettingValue;

/// One configurable module value.
///
/// Identity is the `(name, module_id, shop_id)` key under which the setting
/// is saved; the entity itself carries only the name. Group name and position
/// drive the admin display and default to empty / zero when the display table
/// holds no row for the setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    name: String,
    value: SettingValue,
    #[serde(default)]
    constraints: Vec<String>,
    #[serde(default)]
    group_name: String,
    #[serde(default)]
    position_in_group: i32,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: SettingValue) -> Self {
        Self {
            name: name.into(),
            value,
            constraints: Vec::new(),
            group_name: String::new(),
            position_in_group: 0,
        }
    }

    /// Restrict the value to an ordered list of allowed choices.
    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    pub fn with_position_in_group(mut self, position: i32) -> Self {
        self.position_in_group = position;
        self
    }

    pub fn set_value(&mut self, value: SettingValue) {
        self.value = value;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    /// The type tag stored with the encoded value.
    pub fn type_tag(&self) -> &str {
        self.value.type_tag()
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn position_in_group(&self) -> i32 {
        self.position_in_group
    }
}
