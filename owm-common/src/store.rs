//! Layered record store
//!
//! Base plugins are immutable and listed in load order; a later plugin's copy
//! of a record wins. All writes go to a single patch plugin layered on top:
//! overriding a base record clones it into the patch on first write, new
//! records are allocated patch form ids.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::records::{CraftTarget, MajorRecord, Record, RecordKind};
use crate::form_key::MAX_FORM_ID;
use crate::{Error, FormKey, Result};

/// First form id handed out in a new plugin (ids below are reserved)
pub const FIRST_FORM_ID: u32 = 0x800;

/// One plugin file worth of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin file name, e.g. `Fallout4.esm`
    pub name: String,
    #[serde(default)]
    pub masters: Vec<String>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            masters: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Typed lookup of a record in this plugin only
    pub fn get<T: MajorRecord>(&self, key: &FormKey) -> Option<&T> {
        self.records
            .iter()
            .filter(|record| record.form_key() == key)
            .find_map(T::from_record)
    }

    /// All records of one type in this plugin, in file order
    pub fn records_of<T: MajorRecord>(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter().filter_map(T::from_record)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a plugin dump from JSON
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read plugin {}: {}", path.display(), e),
            ))
        })?;
        let plugin: Plugin = serde_json::from_str(&content)?;
        debug!(
            plugin = %plugin.name,
            records = plugin.records.len(),
            "Loaded plugin from {}",
            path.display()
        );
        Ok(plugin)
    }

    /// Write the plugin as pretty-printed JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Position of a winning base record
#[derive(Debug, Clone, Copy)]
struct Slot {
    plugin: usize,
    record: usize,
}

/// Load order plus the patch overlay
pub struct RecordStore {
    plugins: Vec<Plugin>,
    winners: HashMap<FormKey, Slot>,
    /// Base record keys, highest-priority plugin first
    order: Vec<FormKey>,
    editor_ids: HashMap<(RecordKind, String), FormKey>,
    patch: Plugin,
    patch_index: HashMap<FormKey, usize>,
    next_form_id: u32,
}

impl RecordStore {
    /// Build a store over `plugins` (load order, lowest priority first)
    pub fn new(plugins: Vec<Plugin>, patch_name: impl Into<String>) -> Self {
        let patch_name = patch_name.into();

        let mut winners = HashMap::new();
        for (plugin_index, plugin) in plugins.iter().enumerate() {
            for (record_index, record) in plugin.records.iter().enumerate() {
                winners.insert(
                    record.form_key().clone(),
                    Slot {
                        plugin: plugin_index,
                        record: record_index,
                    },
                );
            }
        }

        let mut order = Vec::with_capacity(winners.len());
        {
            let mut seen = HashSet::with_capacity(winners.len());
            for plugin in plugins.iter().rev() {
                for record in &plugin.records {
                    if seen.insert(record.form_key()) {
                        order.push(record.form_key().clone());
                    }
                }
            }
        }

        // Highest priority first, so the first claim on an editor ID sticks
        let mut editor_ids = HashMap::new();
        for key in &order {
            let Some(slot) = winners.get(key) else {
                continue;
            };
            let record = &plugins[slot.plugin].records[slot.record];
            if let Some(edid) = record.editor_id() {
                editor_ids
                    .entry((record.kind(), edid.to_string()))
                    .or_insert_with(|| key.clone());
            }
        }

        // A previous run's output may be loaded under the same name
        let next_form_id = plugins
            .iter()
            .flat_map(|plugin| plugin.records.iter())
            .map(Record::form_key)
            .filter(|key| key.plugin == patch_name)
            .map(|key| key.id + 1)
            .max()
            .unwrap_or(FIRST_FORM_ID)
            .max(FIRST_FORM_ID);

        debug!(
            plugins = plugins.len(),
            records = order.len(),
            patch = %patch_name,
            "Record store initialized"
        );

        Self {
            plugins,
            winners,
            order,
            editor_ids,
            patch: Plugin::new(patch_name),
            patch_index: HashMap::new(),
            next_form_id,
        }
    }

    pub fn patch_name(&self) -> &str {
        &self.patch.name
    }

    /// The output layer
    pub fn patch(&self) -> &Plugin {
        &self.patch
    }

    pub fn into_patch(self) -> Plugin {
        self.patch
    }

    fn lookup(&self, key: &FormKey) -> Option<&Record> {
        if let Some(&index) = self.patch_index.get(key) {
            return self.patch.records.get(index);
        }
        let slot = self.winners.get(key)?;
        self.plugins.get(slot.plugin)?.records.get(slot.record)
    }

    /// Winning version of a record, None if dangling or of another type
    pub fn resolve<T: MajorRecord>(&self, key: &FormKey) -> Option<&T> {
        self.lookup(key).and_then(T::from_record)
    }

    /// Resolve what a recipe produces
    pub fn resolve_target(&self, key: &FormKey) -> Option<CraftTarget> {
        self.lookup(key).and_then(CraftTarget::from_record)
    }

    /// Lookup by exact editor ID among winning records of one type
    pub fn try_resolve_by_editor_id<T: MajorRecord>(&self, editor_id: &str) -> Option<&T> {
        let key = self.editor_ids.get(&(T::KIND, editor_id.to_string()))?;
        self.resolve(key)
    }

    /// Winning records of one type
    ///
    /// Records new in the patch come first, then base records with the
    /// highest-priority plugin first; overridden records yield the patch copy.
    pub fn winning_overrides<T: MajorRecord>(&self) -> impl Iterator<Item = &T> + '_ {
        let new_records = self
            .patch
            .records
            .iter()
            .filter(move |record| !self.winners.contains_key(record.form_key()));
        let base = self.order.iter().filter_map(move |key| self.lookup(key));

        new_records.chain(base).filter_map(T::from_record)
    }

    /// Copy-on-write access to a record in the patch
    pub fn get_or_add_override<T: MajorRecord>(&mut self, key: &FormKey) -> Result<&mut T> {
        let index = match self.patch_index.get(key) {
            Some(&index) => index,
            None => {
                let record = self
                    .lookup(key)
                    .ok_or_else(|| Error::NotFound(format!("{} {}", T::KIND, key)))?;
                if T::from_record(record).is_none() {
                    return Err(Error::InvalidInput(format!(
                        "{} is a {}, not a {}",
                        key,
                        record.kind(),
                        T::KIND
                    )));
                }
                let record = record.clone();
                self.push_patch(record)
            }
        };
        self.patch_record_mut(index)
    }

    /// Clone `template` into the patch under a new form key and editor ID
    pub fn duplicate_as_new_record<T: MajorRecord>(
        &mut self,
        template: &FormKey,
        editor_id: &str,
    ) -> Result<&mut T> {
        let mut record = self
            .resolve::<T>(template)
            .ok_or_else(|| Error::NotFound(format!("{} template {}", T::KIND, template)))?
            .clone();

        let key = self.next_form_key()?;
        record.set_identity(key.clone(), Some(editor_id.to_string()));
        self.editor_ids
            .insert((T::KIND, editor_id.to_string()), key);

        let index = self.push_patch(record.into());
        self.patch_record_mut(index)
    }

    /// Create a new record in the patch
    pub fn add_new<T: MajorRecord>(
        &mut self,
        editor_id: &str,
        init: impl FnOnce(FormKey) -> T,
    ) -> Result<&mut T> {
        let key = self.next_form_key()?;
        let mut record = init(key.clone());
        record.set_identity(key.clone(), Some(editor_id.to_string()));
        self.editor_ids
            .insert((T::KIND, editor_id.to_string()), key);

        let index = self.push_patch(record.into());
        self.patch_record_mut(index)
    }

    fn next_form_key(&mut self) -> Result<FormKey> {
        if self.next_form_id > MAX_FORM_ID {
            return Err(Error::Internal(format!(
                "No form ids left in {}",
                self.patch.name
            )));
        }
        let key = FormKey::new(self.next_form_id, self.patch.name.clone());
        self.next_form_id += 1;
        Ok(key)
    }

    fn push_patch(&mut self, record: Record) -> usize {
        let index = self.patch.records.len();
        self.patch_index.insert(record.form_key().clone(), index);
        self.patch.records.push(record);
        index
    }

    fn patch_record_mut<T: MajorRecord>(&mut self, index: usize) -> Result<&mut T> {
        self.patch
            .records
            .get_mut(index)
            .and_then(T::from_record_mut)
            .ok_or_else(|| Error::Internal(format!("patch slot {} is not a {}", index, T::KIND)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ConstructibleObject, Item, Keyword, KeywordType};

    fn keyword(id: u32, plugin: &str, edid: &str) -> Record {
        Keyword {
            form_key: FormKey::new(id, plugin),
            editor_id: Some(edid.to_string()),
            name: None,
            kind: KeywordType::None,
        }
        .into()
    }

    fn recipe(id: u32, plugin: &str, categories: Vec<FormKey>) -> Record {
        ConstructibleObject {
            form_key: FormKey::new(id, plugin),
            editor_id: None,
            created_object: None,
            workbench_keyword: None,
            categories: Some(categories),
        }
        .into()
    }

    fn plugin(name: &str, records: Vec<Record>) -> Plugin {
        Plugin {
            name: name.to_string(),
            masters: Vec::new(),
            records,
        }
    }

    #[test]
    fn test_later_plugin_wins() {
        let base = plugin("Base.esm", vec![keyword(0x10, "Base.esm", "Original")]);
        let mod_ = plugin("Mod.esp", vec![keyword(0x10, "Base.esm", "Renamed")]);
        let store = RecordStore::new(vec![base, mod_], "Patch.esp");

        let kw = store
            .resolve::<Keyword>(&FormKey::new(0x10, "Base.esm"))
            .unwrap();
        assert_eq!(kw.editor_id.as_deref(), Some("Renamed"));
        assert!(store.try_resolve_by_editor_id::<Keyword>("Renamed").is_some());
        assert!(store.try_resolve_by_editor_id::<Keyword>("Original").is_none());
    }

    #[test]
    fn test_resolve_checks_type() {
        let base = plugin("Base.esm", vec![keyword(0x10, "Base.esm", "Kw")]);
        let store = RecordStore::new(vec![base], "Patch.esp");

        let key = FormKey::new(0x10, "Base.esm");
        assert!(store.resolve::<Item>(&key).is_none());
        assert!(store.resolve_target(&key).is_none());
        assert!(store.resolve::<Keyword>(&FormKey::new(0x99, "Base.esm")).is_none());
    }

    #[test]
    fn test_override_is_copy_on_write() {
        let crafting = FormKey::new(0x10, "Base.esm");
        let base = plugin(
            "Base.esm",
            vec![
                keyword(0x10, "Base.esm", "Crafting"),
                recipe(0x20, "Base.esm", vec![crafting.clone()]),
            ],
        );
        let mut store = RecordStore::new(vec![base], "Patch.esp");
        let key = FormKey::new(0x20, "Base.esm");

        let cobj = store.get_or_add_override::<ConstructibleObject>(&key).unwrap();
        cobj.categories = Some(Vec::new());

        assert!(store.patch().get::<ConstructibleObject>(&key).is_some());
        assert_eq!(store.patch().records.len(), 1);
        assert_eq!(
            store.plugins[0].get::<ConstructibleObject>(&key).unwrap().categories,
            Some(vec![crafting])
        );
        assert_eq!(
            store.resolve::<ConstructibleObject>(&key).unwrap().categories,
            Some(Vec::new())
        );

        // second access reuses the override
        store.get_or_add_override::<ConstructibleObject>(&key).unwrap();
        assert_eq!(store.patch().records.len(), 1);
    }

    #[test]
    fn test_override_rejects_wrong_type() {
        let base = plugin("Base.esm", vec![keyword(0x10, "Base.esm", "Kw")]);
        let mut store = RecordStore::new(vec![base], "Patch.esp");

        let result = store.get_or_add_override::<Item>(&FormKey::new(0x10, "Base.esm"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(store.patch().is_empty());

        let missing = store.get_or_add_override::<Item>(&FormKey::new(0x11, "Base.esm"));
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_new_records_get_patch_ids() {
        let mut store = RecordStore::new(Vec::new(), "Patch.esp");

        let first = store
            .add_new::<Keyword>("First", |form_key| Keyword {
                form_key,
                editor_id: None,
                name: None,
                kind: KeywordType::RecipeFilter,
            })
            .unwrap()
            .form_key
            .clone();
        let second = store
            .duplicate_as_new_record::<Keyword>(&first, "Second")
            .unwrap()
            .form_key
            .clone();

        assert_eq!(first, FormKey::new(FIRST_FORM_ID, "Patch.esp"));
        assert_eq!(second, FormKey::new(FIRST_FORM_ID + 1, "Patch.esp"));
        assert_eq!(
            store
                .try_resolve_by_editor_id::<Keyword>("Second")
                .map(|kw| kw.form_key.clone()),
            Some(second)
        );
        assert_eq!(store.winning_overrides::<Keyword>().count(), 2);
    }

    #[test]
    fn test_ids_continue_after_previous_output() {
        let previous = plugin("Patch.esp", vec![keyword(0x805, "Patch.esp", "Old")]);
        let mut store = RecordStore::new(vec![previous], "Patch.esp");

        let kw = store
            .add_new::<Keyword>("New", |form_key| Keyword {
                form_key,
                editor_id: None,
                name: None,
                kind: KeywordType::None,
            })
            .unwrap();
        assert_eq!(kw.form_key.id, 0x806);
    }

    #[test]
    fn test_form_ids_run_out() {
        let previous = plugin(
            "Patch.esp",
            vec![keyword(MAX_FORM_ID - 1, "Patch.esp", "Old")],
        );
        let mut store = RecordStore::new(vec![previous], "Patch.esp");
        let new_keyword = |form_key: FormKey| Keyword {
            form_key,
            editor_id: None,
            name: None,
            kind: KeywordType::None,
        };

        let last = store.add_new::<Keyword>("Last", new_keyword).unwrap();
        assert_eq!(last.form_key.id, MAX_FORM_ID);

        let result = store.add_new::<Keyword>("TooMany", new_keyword);
        assert!(matches!(result, Err(Error::Internal(_))));
        let old = FormKey::new(MAX_FORM_ID - 1, "Patch.esp");
        let result = store.duplicate_as_new_record::<Keyword>(&old, "Copy");
        assert!(matches!(result, Err(Error::Internal(_))));
        assert_eq!(store.patch().records.len(), 1);
    }

    #[test]
    fn test_winning_overrides_order() {
        let base = plugin(
            "Base.esm",
            vec![keyword(0x10, "Base.esm", "A"), keyword(0x11, "Base.esm", "B")],
        );
        let mod_ = plugin("Mod.esp", vec![keyword(0x12, "Mod.esp", "C")]);
        let mut store = RecordStore::new(vec![base, mod_], "Patch.esp");
        store
            .get_or_add_override::<Keyword>(&FormKey::new(0x11, "Base.esm"))
            .unwrap()
            .name = Some("patched".to_string());

        let names: Vec<_> = store
            .winning_overrides::<Keyword>()
            .map(|kw| (kw.editor_id.clone().unwrap(), kw.name.clone()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("C".to_string(), None),
                ("A".to_string(), None),
                ("B".to_string(), Some("patched".to_string())),
            ]
        );
    }

    #[test]
    fn test_plugin_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Base.esm.json");
        let original = plugin("Base.esm", vec![keyword(0x10, "Base.esm", "Kw")]);

        original.save_json(&path).unwrap();
        let loaded = Plugin::load_json(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
