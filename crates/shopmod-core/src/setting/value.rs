use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::setting::error::{Result, SettingError};

/// Tagged setting value.
///
/// Each tag has an explicit encode/decode pair; the encoded text is the raw
/// column content of the legacy config table, so existing rows stay readable:
///
/// - `bool` is stored as `"1"` / `""`
/// - `int` as decimal text
/// - `str` and custom tags as the raw text
/// - `arr` / `aarr` as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
    AssocList(IndexMap<String, String>),
    /// A value with a tag this store does not interpret. The tag is kept so
    /// the row round-trips unchanged.
    Custom { kind: String, raw: String },
}

impl SettingValue {
    /// The type tag stored alongside the encoded value.
    pub fn type_tag(&self) -> &str {
        match self {
            SettingValue::Str(_) => "str",
            SettingValue::Int(_) => "int",
            SettingValue::Bool(_) => "bool",
            SettingValue::List(_) => "arr",
            SettingValue::AssocList(_) => "aarr",
            SettingValue::Custom { kind, .. } => kind,
        }
    }

    /// Encode the value to its raw column text.
    pub fn encode(&self) -> String {
        match self {
            SettingValue::Str(s) => s.clone(),
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    String::new()
                }
            }
            // Lists always encode losslessly to JSON; both variants hold
            // string payloads, so serialization cannot fail.
            SettingValue::List(values) => {
                serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
            }
            SettingValue::AssocList(values) => {
                serde_json::to_string(values).unwrap_or_else(|_| "{}".to_string())
            }
            SettingValue::Custom { raw, .. } => raw.clone(),
        }
    }

    /// Decode raw column text under the given type tag.
    ///
    /// Unknown tags are preserved as [`SettingValue::Custom`] rather than
    /// rejected, matching the legacy table which never validated tags.
    pub fn decode(tag: &str, raw: &str) -> Result<Self> {
        match tag {
            "str" => Ok(SettingValue::Str(raw.to_string())),
            "int" => raw
                .trim()
                .parse::<i64>()
                .map(SettingValue::Int)
                .map_err(|e| SettingError::InvalidValue {
                    tag: tag.to_string(),
                    message: e.to_string(),
                }),
            "bool" => Ok(SettingValue::Bool(raw == "1" || raw == "true")),
            "arr" => serde_json::from_str(raw).map(SettingValue::List).map_err(|e| {
                SettingError::InvalidValue {
                    tag: tag.to_string(),
                    message: e.to_string(),
                }
            }),
            "aarr" => serde_json::from_str(raw)
                .map(SettingValue::AssocList)
                .map_err(|e| SettingError::InvalidValue {
                    tag: tag.to_string(),
                    message: e.to_string(),
                }),
            _ => Ok(SettingValue::Custom {
                kind: tag.to_string(),
                raw: raw.to_string(),
            }),
        }
    }
}
