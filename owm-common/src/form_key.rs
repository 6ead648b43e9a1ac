//! Record identity: a local form id plus the plugin that defines it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Record key, written as `00ABCD:Plugin.esm`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormKey {
    pub id: u32,
    pub plugin: String,
}

impl FormKey {
    pub fn new(id: u32, plugin: impl Into<String>) -> Self {
        Self {
            id,
            plugin: plugin.into(),
        }
    }

    /// Form id 0 is the null link
    pub fn is_null(&self) -> bool {
        self.id == 0
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.id, self.plugin)
    }
}

/// Largest id a plugin can hold (the top byte is the load order index)
pub const MAX_FORM_ID: u32 = 0x00FF_FFFF;

impl FromStr for FormKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, plugin) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidInput(format!("Malformed form key '{}'", s)))?;

        let id = u32::from_str_radix(id.trim(), 16)
            .map_err(|e| Error::InvalidInput(format!("Malformed form id in '{}': {}", s, e)))?;
        if id > MAX_FORM_ID {
            return Err(Error::InvalidInput(format!(
                "Form id out of range in '{}'",
                s
            )));
        }

        let plugin = plugin.trim();
        if plugin.is_empty() {
            return Err(Error::InvalidInput(format!(
                "Missing plugin name in form key '{}'",
                s
            )));
        }

        Ok(Self::new(id, plugin))
    }
}

impl TryFrom<String> for FormKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormKey> for String {
    fn from(key: FormKey) -> Self {
        key.to_string()
    }
}
