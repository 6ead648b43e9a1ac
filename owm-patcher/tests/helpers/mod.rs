//! Test Helper Utilities
//!
//! Builds a small load order: a base game plugin with the menu filters and
//! generic furniture keywords, the OWM master with the fixed categories and
//! the installer quest, and a mod plugin each test fills with benches and
//! recipes.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use owm_common::records::{
    BenchType, ConstructibleObject, FormList, Furniture, Item, Keyword, KeywordType, Quest,
    QuestData, Race, Record, Subgraph, VirtualMachineAdapter,
};
use owm_common::script::{PropertyValue, ScriptEntry, ScriptProperty};
use owm_common::{FormKey, Plugin};
use owm_patcher::{build_patch, PatcherConfig, RunReport};

pub const BASE: &str = "Fallout4.esm";
pub const MASTER: &str = "OWM-Master.esm";
pub const MODS: &str = "Benches.esp";
pub const PATCH: &str = "OWM-Patch.esp";

pub fn base_key(id: u32) -> FormKey {
    FormKey::new(id, BASE)
}

pub fn master_key(id: u32) -> FormKey {
    FormKey::new(id, MASTER)
}

pub fn mod_key(id: u32) -> FormKey {
    FormKey::new(id, MODS)
}

pub fn crafting_filter() -> FormKey {
    base_key(0x10)
}

pub fn quest_filter() -> FormKey {
    base_key(0x11)
}

pub fn workbench_general() -> FormKey {
    base_key(0x12)
}

pub fn anim_linking() -> FormKey {
    base_key(0x13)
}

pub fn chemlab() -> FormKey {
    base_key(0x14)
}

pub fn workbench_type_crafting() -> FormKey {
    base_key(0x15)
}

pub fn weapons() -> FormKey {
    master_key(0x801)
}

pub fn armor() -> FormKey {
    master_key(0x802)
}

pub fn misc() -> FormKey {
    master_key(0x805)
}

pub fn chemistry() -> FormKey {
    master_key(0x806)
}

pub fn installer_quest() -> FormKey {
    master_key(0x820)
}

pub fn grouped_menu() -> FormKey {
    master_key(0x830)
}

/// Fixed clock: 2025-01-01T00:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn keyword(key: FormKey, edid: Option<&str>, kind: KeywordType) -> Record {
    Keyword {
        form_key: key,
        editor_id: edid.map(str::to_string),
        name: None,
        kind,
    }
    .into()
}

pub fn base_plugin() -> Plugin {
    let mut plugin = Plugin::new(BASE);
    plugin.records = vec![
        keyword(
            crafting_filter(),
            Some("WorkshopRecipeFilterCrafting"),
            KeywordType::RecipeFilter,
        ),
        keyword(
            quest_filter(),
            Some("WorkshopRecipeFilterQuest"),
            KeywordType::RecipeFilter,
        ),
        keyword(workbench_general(), Some("Workbench_General"), KeywordType::None),
        keyword(
            anim_linking(),
            Some("AnimsFurnitureBehaviorLinking"),
            KeywordType::None,
        ),
        keyword(chemlab(), Some("WorkbenchChemlab"), KeywordType::None),
        keyword(
            workbench_type_crafting(),
            Some("WorkshopWorkbenchTypeCrafting"),
            KeywordType::None,
        ),
    ];
    plugin
}

pub fn installer_script() -> ScriptEntry {
    ScriptEntry {
        name: "pra:OrganizedWorkbenchMenuMain".to_string(),
        properties: vec![
            ScriptProperty::new("ModName", "Template"),
            ScriptProperty::new("currentVersion", 0),
            ScriptProperty::new("Menus", PropertyValue::StructList(Vec::new())),
        ],
    }
}

pub fn master_plugin() -> Plugin {
    let mut plugin = Plugin::new(MASTER);
    plugin.masters = vec![BASE.to_string()];

    let categories = [
        "praWBG_Weapons",
        "praWBG_Armor",
        "praWBG_PowerArmor",
        "praWBG_Robot",
        "praWBG_Misc",
        "praWBG_Chemistry",
        "praWBG_Cooking",
        "praWBG_Nukacola",
    ];
    for (offset, edid) in categories.into_iter().enumerate() {
        plugin.records.push(keyword(
            master_key(0x801 + offset as u32),
            Some(edid),
            KeywordType::RecipeFilter,
        ));
    }

    plugin.records.push(
        Quest {
            form_key: installer_quest(),
            editor_id: Some("pra_SmmOrganizedMenuInstaller".to_string()),
            name: None,
            data: Some(QuestData {
                start_game_enabled: true,
                run_once: true,
                priority: 50,
            }),
            virtual_machine_adapter: Some(VirtualMachineAdapter {
                scripts: vec![installer_script()],
            }),
        }
        .into(),
    );
    plugin.records.push(
        FormList {
            form_key: grouped_menu(),
            editor_id: Some("praWorkshopMenuCraftingGrouped".to_string()),
            items: Vec::new(),
        }
        .into(),
    );
    plugin
}

/// Base + master + a mod plugin under construction
pub struct LoadOrder {
    pub base: Plugin,
    pub master: Plugin,
    pub mods: Plugin,
    pub config: PatcherConfig,
}

impl Default for LoadOrder {
    fn default() -> Self {
        let mut mods = Plugin::new(MODS);
        mods.masters = vec![BASE.to_string(), MASTER.to_string()];
        Self {
            base: base_plugin(),
            master: master_plugin(),
            mods,
            config: PatcherConfig::default(),
        }
    }
}

impl LoadOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&mut self, id: u32, edid: Option<&str>) -> FormKey {
        let key = mod_key(id);
        self.mods
            .records
            .push(keyword(key.clone(), edid, KeywordType::None));
        key
    }

    pub fn bench(
        &mut self,
        id: u32,
        name: Option<&str>,
        bench_type: BenchType,
        keywords: Option<Vec<FormKey>>,
    ) -> FormKey {
        let key = mod_key(id);
        self.mods.records.push(
            Furniture {
                form_key: key.clone(),
                editor_id: Some(format!("Bench{:X}", id)),
                name: name.map(str::to_string),
                bench_type,
                keywords,
            }
            .into(),
        );
        key
    }

    pub fn item(&mut self, id: u32, name: &str) -> FormKey {
        let key = mod_key(id);
        self.mods.records.push(
            Item {
                form_key: key.clone(),
                editor_id: None,
                name: Some(name.to_string()),
            }
            .into(),
        );
        key
    }

    pub fn recipe(
        &mut self,
        id: u32,
        created: &FormKey,
        workbench: Option<FormKey>,
        categories: Option<Vec<FormKey>>,
    ) -> FormKey {
        let key = mod_key(id);
        self.mods.records.push(
            ConstructibleObject {
                form_key: key.clone(),
                editor_id: Some(format!("co_{:X}", id)),
                created_object: Some(created.clone()),
                workbench_keyword: workbench,
                categories,
            }
            .into(),
        );
        key
    }

    /// Recipe placing `bench` from the crafting submenu
    pub fn station_recipe(&mut self, id: u32, bench: &FormKey) -> FormKey {
        self.recipe(
            id,
            bench,
            Some(workbench_type_crafting()),
            Some(vec![crafting_filter()]),
        )
    }

    /// Ordinary recipe crafted at the station named by `workbench`
    pub fn item_recipe(&mut self, id: u32, item: &FormKey, workbench: &FormKey) -> FormKey {
        self.recipe(id, item, Some(workbench.clone()), None)
    }

    pub fn race(&mut self, id: u32, target_keywords: Vec<FormKey>) {
        self.mods.records.push(
            Race {
                form_key: mod_key(id),
                editor_id: Some(format!("Race{:X}", id)),
                subgraphs: vec![Subgraph {
                    behavior_graph: None,
                    target_keywords,
                }],
            }
            .into(),
        );
    }

    pub fn plugins(&self) -> Vec<Plugin> {
        vec![self.base.clone(), self.master.clone(), self.mods.clone()]
    }

    pub fn run(&self) -> owm_common::Result<(Plugin, RunReport)> {
        build_patch(self.plugins(), &self.config, fixed_now())
    }
}

/// Categories of a recipe as written to the patch
pub fn patched_categories(patch: &Plugin, recipe: &FormKey) -> Option<Vec<FormKey>> {
    patch
        .get::<ConstructibleObject>(recipe)
        .and_then(|cobj| cobj.categories.clone())
}

pub fn keyword_in(patch: &Plugin, key: &FormKey) -> Option<Keyword> {
    patch.get::<Keyword>(key).cloned()
}
