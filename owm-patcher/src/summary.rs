//! Menu installer quest
//!
//! New categories only show up in game once the installer script attaches
//! them to the grouped crafting menu. One quest, duplicated from the
//! template in the OWM master, lists every category created by the run.

use chrono::{DateTime, Utc};
use owm_common::edid::to_edid;
use owm_common::records::{FormList, Quest, QuestData};
use owm_common::script::{PropertyValue, ScriptProperty, ScriptStruct};
use owm_common::{Error, FormKey, RecordStore, Result};
use tracing::info;

use crate::config::SummaryConfig;

/// `currentVersion`: seconds since the configured epoch, as a Papyrus int
pub fn version_number(now: DateTime<Utc>, epoch: i64) -> Result<i32> {
    let seconds = now.timestamp() - epoch;
    i32::try_from(seconds).map_err(|_| {
        Error::InvalidInput(format!(
            "Version number {} does not fit a script int (epoch {})",
            seconds, epoch
        ))
    })
}

/// Editor ID of the installer quest for a patch file
pub fn summary_editor_id(config: &SummaryConfig, patch_name: &str) -> String {
    to_edid(&format!(
        "{}{}",
        config.editor_id_prefix,
        patch_name.replace('.', "-")
    ))
}

/// Duplicate the installer template and fill in the menu list
///
/// Nothing is written when `new_categories` is empty. A missing template,
/// script or target menu is fatal.
pub fn emit(
    store: &mut RecordStore,
    config: &SummaryConfig,
    new_categories: &[FormKey],
    now: DateTime<Utc>,
) -> Result<Option<FormKey>> {
    if new_categories.is_empty() {
        return Ok(None);
    }

    let template = store
        .try_resolve_by_editor_id::<Quest>(&config.template_editor_id)
        .map(|quest| quest.form_key.clone())
        .ok_or_else(|| Error::MissingTemplate(format!("quest {}", config.template_editor_id)))?;
    let target_menu = store
        .try_resolve_by_editor_id::<FormList>(&config.target_menu_editor_id)
        .map(|list| list.form_key.clone())
        .ok_or_else(|| {
            Error::MissingTemplate(format!("form list {}", config.target_menu_editor_id))
        })?;

    let version = version_number(now, config.version_epoch)?;
    let patch_name = store.patch_name().to_string();
    let editor_id = summary_editor_id(config, &patch_name);

    let quest = store.duplicate_as_new_record::<Quest>(&template, &editor_id)?;
    quest.data.get_or_insert_with(QuestData::default).run_once = false;

    let script = quest
        .virtual_machine_adapter
        .as_mut()
        .and_then(|vmad| vmad.script_mut(&config.script_name))
        .ok_or_else(|| {
            Error::MissingTemplate(format!(
                "script {} on {}",
                config.script_name, config.template_editor_id
            ))
        })?;

    script.set_property("ModName", config.mod_name.as_str());
    script.set_property("Author", config.author.as_str());
    script.set_property("PluginName", patch_name.as_str());
    script.set_property("currentVersion", version);

    let menus: Vec<ScriptStruct> = new_categories
        .iter()
        .map(|category| ScriptStruct {
            members: vec![
                ScriptProperty::new("ModMenu", category.clone()),
                ScriptProperty::new("TargetMenu", target_menu.clone()),
            ],
        })
        .collect();
    script.set_property("Menus", PropertyValue::StructList(menus));

    let key = quest.form_key.clone();
    info!(
        quest = %key,
        editor_id = %editor_id,
        menus = new_categories.len(),
        version,
        "Menu installer quest written"
    );
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_version_counts_from_epoch() {
        let now = Utc.timestamp_opt(1_650_000_123, 0).unwrap();
        assert_eq!(version_number(now, 1_650_000_000).unwrap(), 123);
    }

    #[test]
    fn test_version_overflow_is_an_error() {
        let now = Utc.timestamp_opt(1_650_000_000, 0).unwrap();
        assert!(version_number(now, -1_000_000_000).is_err());
    }

    #[test]
    fn test_summary_editor_id_replaces_dots() {
        let config = SummaryConfig::default();
        assert_eq!(
            summary_editor_id(&config, "OWM-Patch.esp"),
            "pra_OWMPlugin_OWM-Patch-esp"
        );
    }

    #[test]
    fn test_nothing_written_without_new_categories() {
        let mut store = RecordStore::new(Vec::new(), "OWM-Patch.esp");
        let written = emit(&mut store, &SummaryConfig::default(), &[], Utc::now()).unwrap();
        assert!(written.is_none());
        assert!(store.patch().is_empty());
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let mut store = RecordStore::new(Vec::new(), "OWM-Patch.esp");
        let categories = [FormKey::new(0x800, "OWM-Patch.esp")];
        let result = emit(&mut store, &SummaryConfig::default(), &categories, Utc::now());
        assert!(matches!(result, Err(Error::MissingTemplate(_))));
    }
}
