//! Recipe classification
//!
//! Decides whether a recipe builds a workbench and, if so, which keyword on
//! the workbench determines its menu category.
//!
//! The generic crafting bench type (`Alchemy`) is shared by most modded
//! stations, so its keywords are scanned for exactly one plausible
//! candidate. Ambiguity is never guessed: the caller defers the recipe and
//! retries once more evidence has been collected.

use owm_common::records::{BenchType, ConstructibleObject, CraftTarget, Furniture, Keyword};
use owm_common::{FormKey, RecordStore};
use tracing::trace;

use crate::config::StationConfig;
use crate::known::KnownRecords;
use crate::stations::StationTags;

/// Result of looking for a recipe's category-determining keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationLookup {
    /// A station keyword or a fixed category keyword
    Found(FormKey),
    /// Zero or several untrusted candidates
    Undetermined,
}

/// True if the recipe places a workbench in the workshop menu
///
/// Anything under the crafting filter counts. The quest filter only counts
/// for furniture carrying the generic workbench keyword.
pub fn is_station_recipe(
    known: &KnownRecords,
    recipe: &ConstructibleObject,
    target: &CraftTarget,
) -> bool {
    let Some(categories) = recipe.categories.as_ref() else {
        return false;
    };

    if categories.contains(&known.crafting_filter) {
        return true;
    }

    categories.contains(&known.quest_filter)
        && target
            .as_furniture()
            .is_some_and(|furniture| furniture.has_keyword(&known.workbench_general))
}

/// Station keyword detection with configured non-station markers
pub struct Classifier {
    /// Lowercased editor ID markers
    markers: Vec<String>,
}

impl Classifier {
    pub fn new(config: &StationConfig) -> Self {
        Self {
            markers: config
                .non_station_markers
                .iter()
                .filter(|marker| !marker.is_empty())
                .map(|marker| marker.to_lowercase())
                .collect(),
        }
    }

    /// Find the keyword that decides a station recipe's category
    ///
    /// Dedicated bench types map straight to their fixed category; generic
    /// crafting benches go through the candidate scan; everything else is
    /// misc.
    pub fn find_station_category_tag(
        &self,
        store: &RecordStore,
        known: &KnownRecords,
        tags: &mut StationTags,
        target: &CraftTarget,
    ) -> StationLookup {
        let Some(furniture) = target.as_furniture() else {
            return StationLookup::Found(known.categories.misc.clone());
        };

        let fixed = &known.categories;
        match furniture.bench_type {
            BenchType::Weapons => StationLookup::Found(fixed.weapons.clone()),
            BenchType::Armor => StationLookup::Found(fixed.armor.clone()),
            BenchType::PowerArmor => StationLookup::Found(fixed.power_armor.clone()),
            BenchType::RobotMod => StationLookup::Found(fixed.robot.clone()),
            BenchType::Alchemy => self.scan_crafting_bench(store, known, tags, furniture),
            _ => StationLookup::Found(fixed.misc.clone()),
        }
    }

    /// Candidate scan over a generic crafting bench's keywords
    ///
    /// A trusted keyword anywhere in the list wins immediately. Otherwise
    /// exactly one untrusted keyword with a usable editor ID must remain;
    /// it becomes trusted.
    fn scan_crafting_bench(
        &self,
        store: &RecordStore,
        known: &KnownRecords,
        tags: &mut StationTags,
        furniture: &Furniture,
    ) -> StationLookup {
        // No keyword list at all: nothing will ever disambiguate it
        let Some(keywords) = furniture.keywords.as_ref() else {
            return StationLookup::Found(known.categories.misc.clone());
        };

        let mut candidate = None;
        let mut num_candidates = 0usize;

        for keyword in keywords {
            if keyword.is_null() {
                continue;
            }
            if tags.is_known_valid(keyword) {
                return StationLookup::Found(keyword.clone());
            }
            if tags.is_blacklisted(keyword) {
                continue;
            }

            let Some(record) = store.resolve::<Keyword>(keyword) else {
                continue;
            };

            match record.editor_id.as_deref().filter(|edid| !edid.is_empty()) {
                Some(label) if !self.is_non_station_label(label) => {
                    // keep going: a trusted keyword may still follow
                    num_candidates += 1;
                    candidate = Some(keyword.clone());
                }
                _ => {
                    trace!(keyword = %keyword, "Blacklisting non-station keyword");
                    tags.blacklist(keyword);
                }
            }
        }

        match candidate {
            Some(keyword) if num_candidates == 1 => {
                tags.trust(&keyword);
                StationLookup::Found(keyword)
            }
            _ => StationLookup::Undetermined,
        }
    }

    fn is_non_station_label(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.markers.iter().any(|marker| label.contains(marker))
    }
}
