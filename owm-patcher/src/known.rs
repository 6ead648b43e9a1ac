//! Well-known records, resolved by editor ID from the load order
//!
//! The base game and the OWM master plugin define the menu filters, the
//! generic workbench keyword and the fixed categories. Missing required
//! records mean the load order is not one this patcher can work on.

use owm_common::records::Keyword;
use owm_common::{Error, FormKey, RecordStore, Result};
use std::collections::HashSet;
use tracing::debug;

/// Crafting submenu filter (placeholder on station recipes)
pub const RECIPE_FILTER_CRAFTING: &str = "WorkshopRecipeFilterCrafting";
/// Special/quest submenu filter (placeholder on station recipes)
pub const RECIPE_FILTER_QUEST: &str = "WorkshopRecipeFilterQuest";
/// Generic keyword carried by every workbench furniture
pub const WORKBENCH_GENERAL: &str = "Workbench_General";

pub const CATEGORY_WEAPONS: &str = "praWBG_Weapons";
pub const CATEGORY_ARMOR: &str = "praWBG_Armor";
pub const CATEGORY_POWER_ARMOR: &str = "praWBG_PowerArmor";
pub const CATEGORY_ROBOT: &str = "praWBG_Robot";
pub const CATEGORY_MISC: &str = "praWBG_Misc";
pub const CATEGORY_CHEMISTRY: &str = "praWBG_Chemistry";
pub const CATEGORY_COOKING: &str = "praWBG_Cooking";
pub const CATEGORY_NUKACOLA: &str = "praWBG_Nukacola";

/// Station keyword → fixed category, applied before any category is invented
const PRESET_MAPPINGS: &[(&str, &str)] = &[
    ("DLC04_WorkbenchSoda", CATEGORY_NUKACOLA),
    ("WorkbenchChemlab", CATEGORY_CHEMISTRY),
    ("WorkbenchCooking", CATEGORY_COOKING),
];

/// Workbench keywords of item recipes that say nothing about a specific station
const ITEM_STATION_BLACKLIST: &[&str] = &[
    "WorkshopWorkbenchTypeCrafting",
    "WorkshopWorkbenchTypeDecorations",
    "WorkshopWorkbenchTypeExterior",
    "WorkshopWorkbenchTypeFurniture",
    "WorkshopWorkbenchTypeInteriorOnly",
    "WorkshopWorkbenchTypePower",
    "WorkshopWorkbenchTypeSettlement",
    "WorkshopWorkbenchTypeWire",
    "VRWorkshopShared_Keyword_WorkshopWorkbenchTypeVR",
];

/// Furniture keywords that never identify a station
const STATION_BLACKLIST: &[&str] = &[
    "AnimsFurnitureBehaviorLinking",
    "AnimsFurnitureNoMirrorBehaviorLinking",
    "AnimsMinigunTurrentFurniture",
    WORKBENCH_GENERAL,
    "FurnitureForce3rdPerson",
    "FurnitureScaleActorToOne",
    "WorkshopWorkObject",
    "FurnitureClassWork",
];

/// Categories that need no invention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCategories {
    pub weapons: FormKey,
    pub armor: FormKey,
    pub power_armor: FormKey,
    pub robot: FormKey,
    pub misc: FormKey,
    /// All fixed category keywords present in the load order, the five above included
    pub all: Vec<FormKey>,
}

/// Keywords the engine refers to by name
#[derive(Debug, Clone)]
pub struct KnownRecords {
    pub crafting_filter: FormKey,
    pub quest_filter: FormKey,
    pub workbench_general: FormKey,
    pub categories: FixedCategories,
    pub preset_mappings: Vec<(FormKey, FormKey)>,
    pub item_station_blacklist: HashSet<FormKey>,
    pub station_blacklist: Vec<FormKey>,
}

impl KnownRecords {
    /// Resolve everything against the winning records of `store`
    pub fn resolve(store: &RecordStore) -> Result<Self> {
        let weapons = require(store, CATEGORY_WEAPONS)?;
        let armor = require(store, CATEGORY_ARMOR)?;
        let power_armor = require(store, CATEGORY_POWER_ARMOR)?;
        let robot = require(store, CATEGORY_ROBOT)?;
        let misc = require(store, CATEGORY_MISC)?;

        let mut all = vec![
            weapons.clone(),
            armor.clone(),
            power_armor.clone(),
            robot.clone(),
            misc.clone(),
        ];
        all.extend(
            [CATEGORY_CHEMISTRY, CATEGORY_COOKING, CATEGORY_NUKACOLA]
                .into_iter()
                .filter_map(|edid| optional(store, edid)),
        );

        let preset_mappings = PRESET_MAPPINGS
            .iter()
            .filter_map(|(station, category)| {
                Some((optional(store, station)?, optional(store, category)?))
            })
            .collect();

        Ok(Self {
            crafting_filter: require(store, RECIPE_FILTER_CRAFTING)?,
            quest_filter: require(store, RECIPE_FILTER_QUEST)?,
            workbench_general: require(store, WORKBENCH_GENERAL)?,
            categories: FixedCategories {
                weapons,
                armor,
                power_armor,
                robot,
                misc,
                all,
            },
            preset_mappings,
            item_station_blacklist: ITEM_STATION_BLACKLIST
                .iter()
                .filter_map(|edid| optional(store, edid))
                .collect(),
            station_blacklist: STATION_BLACKLIST
                .iter()
                .filter_map(|edid| optional(store, edid))
                .collect(),
        })
    }

    /// Generic menu filters that get replaced by a concrete category
    pub fn placeholders(&self) -> [&FormKey; 2] {
        [&self.crafting_filter, &self.quest_filter]
    }
}

fn require(store: &RecordStore, editor_id: &str) -> Result<FormKey> {
    store
        .try_resolve_by_editor_id::<Keyword>(editor_id)
        .map(|kw| kw.form_key.clone())
        .ok_or_else(|| Error::MissingTemplate(format!("keyword {}", editor_id)))
}

fn optional(store: &RecordStore, editor_id: &str) -> Option<FormKey> {
    let found = store
        .try_resolve_by_editor_id::<Keyword>(editor_id)
        .map(|kw| kw.form_key.clone());
    if found.is_none() {
        debug!("Optional keyword {} not in load order", editor_id);
    }
    found
}
