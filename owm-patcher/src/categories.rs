//! Category cache and on-demand category creation
//!
//! Maps station keywords to the category keyword their recipes are filed
//! under. Categories are named after the station keyword's editor ID, so a
//! re-run over a previous output finds the same keyword by name instead of
//! inventing a second one.

use owm_common::edid::{fallback_label, to_edid};
use owm_common::records::{ConstructibleObject, CraftTarget, Keyword, KeywordType};
use owm_common::{FormKey, RecordStore, Result};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::known::KnownRecords;

pub struct CategoryCache {
    prefix: String,
    misc: FormKey,
    /// Station keyword → category keyword
    mapping: HashMap<FormKey, FormKey>,
    /// Every category keyword this patcher owns
    own: HashSet<FormKey>,
    /// Categories created by this run, in creation order
    created: Vec<FormKey>,
}

impl CategoryCache {
    /// Seed with the preset mappings, the fixed categories and every recipe
    /// filter already named with `prefix`
    pub fn new(store: &RecordStore, known: &KnownRecords, prefix: &str) -> Self {
        let mut own: HashSet<FormKey> = known.categories.all.iter().cloned().collect();
        let mut previous = 0usize;
        for keyword in store.winning_overrides::<Keyword>() {
            let prefixed = keyword
                .editor_id
                .as_deref()
                .is_some_and(|edid| edid.starts_with(prefix));
            if keyword.kind == KeywordType::RecipeFilter
                && prefixed
                && own.insert(keyword.form_key.clone())
            {
                previous += 1;
            }
        }
        debug!(
            own = own.len(),
            previous, "Category keywords recognized in load order"
        );

        Self {
            prefix: prefix.to_string(),
            misc: known.categories.misc.clone(),
            mapping: known.preset_mappings.iter().cloned().collect(),
            own,
            created: Vec::new(),
        }
    }

    pub fn is_own_category(&self, keyword: &FormKey) -> bool {
        self.own.contains(keyword)
    }

    /// True if the recipe was already filed by this patcher (now or earlier)
    pub fn carries_own_category(&self, recipe: &ConstructibleObject) -> bool {
        recipe
            .categories
            .iter()
            .flatten()
            .any(|keyword| self.own.contains(keyword))
    }

    /// Category keyword for recipes of a station identified by `station_tag`
    ///
    /// Creates the category if needed. A station that cannot be named maps to
    /// misc, and that decision is cached too.
    pub fn resolve(
        &mut self,
        store: &mut RecordStore,
        station_tag: &FormKey,
        target: &CraftTarget,
    ) -> Result<FormKey> {
        if self.own.contains(station_tag) {
            return Ok(station_tag.clone());
        }
        if let Some(category) = self.mapping.get(station_tag) {
            return Ok(category.clone());
        }

        let category = match self.try_create(store, station_tag, target)? {
            Some(category) => category,
            None => {
                warn!(
                    station = %station_tag,
                    target = %target.form_key(),
                    "Station has no display name, filing under misc"
                );
                self.misc.clone()
            }
        };

        self.mapping.insert(station_tag.clone(), category.clone());
        Ok(category)
    }

    fn try_create(
        &mut self,
        store: &mut RecordStore,
        station_tag: &FormKey,
        target: &CraftTarget,
    ) -> Result<Option<FormKey>> {
        let label = store
            .resolve::<Keyword>(station_tag)
            .and_then(|keyword| keyword.editor_id.clone())
            .filter(|edid| !edid.is_empty())
            .unwrap_or_else(|| fallback_label(station_tag));
        let editor_id = to_edid(&format!("{}{}", self.prefix, label));

        if let Some(existing) = store.try_resolve_by_editor_id::<Keyword>(&editor_id) {
            debug!(category = %editor_id, "Reusing existing submenu");
            let key = existing.form_key.clone();
            self.own.insert(key.clone());
            return Ok(Some(key));
        }

        let Some(name) = target.display_name().map(str::to_string) else {
            return Ok(None);
        };

        info!("Creating new submenu for {}", name);
        let keyword = store.add_new::<Keyword>(&editor_id, |form_key| Keyword {
            form_key,
            editor_id: None,
            name: Some(name),
            kind: KeywordType::RecipeFilter,
        })?;
        let key = keyword.form_key.clone();

        self.own.insert(key.clone());
        self.created.push(key.clone());
        Ok(Some(key))
    }

    /// Categories created by this run, in creation order
    pub fn created(&self) -> &[FormKey] {
        &self.created
    }
}
