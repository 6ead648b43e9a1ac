//! Station keyword knowledge
//!
//! Two monotonically growing sets: keywords confirmed to identify a station
//! and keywords known not to. A keyword is in at most one of them; once
//! placed it never moves.

use owm_common::records::{ConstructibleObject, Keyword, Race};
use owm_common::{FormKey, RecordStore};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::StationConfig;
use crate::known::KnownRecords;

#[derive(Debug, Default, Clone)]
pub struct StationTags {
    known_valid: HashSet<FormKey>,
    blacklist: HashSet<FormKey>,
}

impl StationTags {
    /// Blacklist seeded from the fixed list, configured editor IDs and the
    /// target keywords of every race animation subgraph
    pub fn seeded(store: &RecordStore, known: &KnownRecords, config: &StationConfig) -> Self {
        let mut tags = Self::default();

        for keyword in &known.station_blacklist {
            tags.blacklist(keyword);
        }

        for editor_id in &config.extra_blacklist {
            match store.try_resolve_by_editor_id::<Keyword>(editor_id) {
                Some(keyword) => {
                    tags.blacklist(&keyword.form_key);
                }
                None => debug!("Blacklist keyword {} not in load order", editor_id),
            }
        }

        let mut from_races = 0usize;
        for race in store.winning_overrides::<Race>() {
            for subgraph in &race.subgraphs {
                for keyword in &subgraph.target_keywords {
                    if tags.blacklist(keyword) {
                        from_races += 1;
                    }
                }
            }
        }

        info!(
            blacklisted = tags.blacklist.len(),
            from_races, "Station keyword blacklist seeded"
        );
        tags
    }

    pub fn is_known_valid(&self, keyword: &FormKey) -> bool {
        self.known_valid.contains(keyword)
    }

    pub fn is_blacklisted(&self, keyword: &FormKey) -> bool {
        self.blacklist.contains(keyword)
    }

    /// Mark a keyword as station-identifying; false if it was already known
    /// or is blacklisted
    pub fn trust(&mut self, keyword: &FormKey) -> bool {
        if self.blacklist.contains(keyword) {
            return false;
        }
        self.known_valid.insert(keyword.clone())
    }

    /// Mark a keyword as never station-identifying; false if it was already
    /// blacklisted or is trusted
    pub fn blacklist(&mut self, keyword: &FormKey) -> bool {
        if self.known_valid.contains(keyword) {
            return false;
        }
        self.blacklist.insert(keyword.clone())
    }

    /// Learn from an ordinary item recipe: the station it is crafted at is
    /// named by its workbench keyword
    pub fn observe_item_recipe(&mut self, recipe: &ConstructibleObject, known: &KnownRecords) -> bool {
        let Some(keyword) = recipe.workbench_keyword.as_ref().filter(|k| !k.is_null()) else {
            return false;
        };
        if known.item_station_blacklist.contains(keyword) {
            return false;
        }

        let learned = self.trust(keyword);
        if learned {
            debug!(keyword = %keyword, recipe = %recipe.form_key, "Station keyword learned from item recipe");
        }
        learned
    }

    pub fn known_valid_count(&self) -> usize {
        self.known_valid.len()
    }

    pub fn blacklist_count(&self) -> usize {
        self.blacklist.len()
    }
}
