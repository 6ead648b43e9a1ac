//! Patcher configuration
//!
//! Loaded from `owm-patcher.toml` (see [`owm_common::config`] for resolution).
//! Every field has a built-in default, so an empty or missing file is valid.

use owm_common::config::LoggingConfig;
use serde::Deserialize;

/// Top-level patcher settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatcherConfig {
    /// File name of the output plugin
    pub patch_file_name: String,
    /// Editor ID prefix of every category keyword this patcher owns
    pub category_prefix: String,
    pub stations: StationConfig,
    pub summary: SummaryConfig,
    pub logging: LoggingConfig,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            patch_file_name: "OWM-Patch.esp".to_string(),
            category_prefix: "praWBG_".to_string(),
            stations: StationConfig::default(),
            summary: SummaryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Station keyword detection
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StationConfig {
    /// Editor ID substrings (case-insensitive) of keywords that never name a station
    pub non_station_markers: Vec<String>,
    /// Extra editor IDs to blacklist; IDs not present in the load order are ignored
    pub extra_blacklist: Vec<String>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            non_station_markers: vec!["AnimFurn".to_string()],
            extra_blacklist: vec![
                "SS2_ForceOwnership".to_string(),
                "kgSIM_PreventAutoAssign".to_string(),
            ],
        }
    }
}

/// The menu installer quest written when new categories exist
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    /// Quest duplicated as the installer
    pub template_editor_id: String,
    /// Script on the template that receives the menu list
    pub script_name: String,
    /// Form list every new category is attached to
    pub target_menu_editor_id: String,
    pub editor_id_prefix: String,
    pub mod_name: String,
    pub author: String,
    /// Subtracted from the unix time to form `currentVersion`
    /// (1650000000 = 2022-04-15T05:20:00Z)
    pub version_epoch: i64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            template_editor_id: "pra_SmmOrganizedMenuInstaller".to_string(),
            script_name: "pra:OrganizedWorkbenchMenuMain".to_string(),
            target_menu_editor_id: "praWorkshopMenuCraftingGrouped".to_string(),
            editor_id_prefix: "pra_OWMPlugin_".to_string(),
            mod_name: "Automatic Synthesis OWM patch".to_string(),
            author: "WorkbenchOrganizer by Pra".to_string(),
            version_epoch: 1_650_000_000,
        }
    }
}
