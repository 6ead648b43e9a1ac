use serde::{Deserialize, Serialize};

use crate::FormKey;

/// Workbench flavor of a furniture record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchType {
    #[default]
    None,
    CreateObject,
    Weapons,
    EnchantingExperiment,
    Enchanting,
    AlchemyExperiment,
    /// Generic crafting bench, reused by most modded stations
    Alchemy,
    Armor,
    PowerArmor,
    RobotMod,
}

/// Furniture (FURN); workbenches are furniture with a bench type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub bench_type: BenchType,
    /// None when the record has no keyword list at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<FormKey>>,
}

impl Furniture {
    pub fn has_keyword(&self, keyword: &FormKey) -> bool {
        self.keywords
            .as_ref()
            .is_some_and(|keywords| keywords.contains(keyword))
    }
}
