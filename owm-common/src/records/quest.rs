use serde::{Deserialize, Serialize};

use crate::script::ScriptEntry;
use crate::FormKey;

/// Quest data block; only the flags the patcher touches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
    #[serde(default)]
    pub start_game_enabled: bool,
    #[serde(default)]
    pub run_once: bool,
    #[serde(default)]
    pub priority: u8,
}

/// Papyrus scripts attached to a record (VMAD)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachineAdapter {
    #[serde(default)]
    pub scripts: Vec<ScriptEntry>,
}

impl VirtualMachineAdapter {
    /// Script by exact name
    pub fn script_mut(&mut self, name: &str) -> Option<&mut ScriptEntry> {
        self.scripts.iter_mut().find(|script| script.name == name)
    }
}

/// Quest (QUST)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<QuestData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine_adapter: Option<VirtualMachineAdapter>,
}
