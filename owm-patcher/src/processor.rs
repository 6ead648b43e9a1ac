//! Patch run orchestration
//!
//! One run walks every winning recipe once (pass 1), then drains the backlog
//! of station recipes it could not decide (pass 2, where undecided means
//! misc), then writes the menu installer quest if any category was created.
//! The first error aborts the run; the caller discards the patch.

use chrono::{DateTime, Utc};
use owm_common::records::{ConstructibleObject, CraftTarget};
use owm_common::{FormKey, Plugin, RecordStore, Result};
use tracing::{debug, info, trace};

use crate::backlog::Backlog;
use crate::categories::CategoryCache;
use crate::classify::{is_station_recipe, Classifier, StationLookup};
use crate::config::PatcherConfig;
use crate::known::KnownRecords;
use crate::override_writer::move_to_category;
use crate::stations::StationTags;
use crate::summary;

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Winning recipes walked in pass 1
    pub recipes: usize,
    /// Recipes whose created object does not resolve
    pub dangling: usize,
    pub station_recipes: usize,
    /// Station recipes skipped because their workbench keyword is missing or null
    pub no_workbench_keyword: usize,
    /// Station recipes skipped because they already carry a category of ours
    pub already_filed: usize,
    /// Station recipes deferred to pass 2
    pub deferred: usize,
    /// Recipes whose override was written
    pub patched: usize,
    pub created_categories: Vec<FormKey>,
    pub known_stations: usize,
    pub blacklisted_keywords: usize,
    /// Installer quest, if one was written
    pub summary: Option<FormKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    First,
    Backlog,
}

/// Single patch run over a store
///
/// All caches live here, so independent runs never share state.
pub struct Processor<'a> {
    store: &'a mut RecordStore,
    config: &'a PatcherConfig,
    known: KnownRecords,
    classifier: Classifier,
    tags: StationTags,
    categories: CategoryCache,
    backlog: Backlog,
    report: RunReport,
}

impl<'a> Processor<'a> {
    /// Resolve well-known records and seed the caches
    pub fn new(store: &'a mut RecordStore, config: &'a PatcherConfig) -> Result<Self> {
        let known = KnownRecords::resolve(store)?;
        let tags = StationTags::seeded(store, &known, &config.stations);
        let categories = CategoryCache::new(store, &known, &config.category_prefix);

        Ok(Self {
            store,
            config,
            known,
            classifier: Classifier::new(&config.stations),
            tags,
            categories,
            backlog: Backlog::default(),
            report: RunReport::default(),
        })
    }

    pub fn run(self) -> Result<RunReport> {
        self.run_at(Utc::now())
    }

    /// Run with a fixed clock (the installer version depends on it)
    pub fn run_at(mut self, now: DateTime<Utc>) -> Result<RunReport> {
        // Snapshot: overrides written during the pass must not be walked again
        let recipes: Vec<ConstructibleObject> = self
            .store
            .winning_overrides::<ConstructibleObject>()
            .cloned()
            .collect();
        info!(recipes = recipes.len(), "Processing recipes");

        for recipe in recipes {
            let key = recipe.form_key.clone();
            let editor_id = recipe.editor_id.clone();
            self.process_recipe(recipe)
                .map_err(|e| e.for_record(&key, editor_id.as_deref()))?;
        }

        let deferred = self.backlog.drain();
        if !deferred.is_empty() {
            info!(entries = deferred.len(), "Processing backlog");
        }
        for entry in deferred {
            let key = entry.recipe.form_key.clone();
            let editor_id = entry.recipe.editor_id.clone();
            self.process_station(entry.recipe, entry.target, Pass::Backlog)
                .map_err(|e| e.for_record(&key, editor_id.as_deref()))?;
        }

        self.report.summary = summary::emit(
            self.store,
            &self.config.summary,
            self.categories.created(),
            now,
        )?;

        self.report.created_categories = self.categories.created().to_vec();
        self.report.deferred = self.backlog.total_deferred();
        self.report.known_stations = self.tags.known_valid_count();
        self.report.blacklisted_keywords = self.tags.blacklist_count();

        info!(
            recipes = self.report.recipes,
            station_recipes = self.report.station_recipes,
            deferred = self.report.deferred,
            patched = self.report.patched,
            created = self.report.created_categories.len(),
            "Patch run complete"
        );
        Ok(self.report)
    }

    fn process_recipe(&mut self, recipe: ConstructibleObject) -> Result<()> {
        self.report.recipes += 1;

        let Some(created) = recipe.created_object.as_ref().filter(|key| !key.is_null()) else {
            trace!(recipe = %recipe.form_key, "Recipe creates nothing");
            return Ok(());
        };
        let Some(target) = self.store.resolve_target(created) else {
            debug!(recipe = %recipe.form_key, created = %created, "Created object does not resolve");
            self.report.dangling += 1;
            return Ok(());
        };

        if !is_station_recipe(&self.known, &recipe, &target) {
            self.tags.observe_item_recipe(&recipe, &self.known);
            return Ok(());
        }

        self.report.station_recipes += 1;

        // Stations without a workbench keyword are left where their author put them
        if recipe.workbench_keyword.as_ref().map_or(true, FormKey::is_null) {
            debug!(recipe = %recipe.form_key, "Station recipe has no workbench keyword, skipping");
            self.report.no_workbench_keyword += 1;
            return Ok(());
        }

        self.process_station(recipe, target, Pass::First)
    }

    fn process_station(
        &mut self,
        recipe: ConstructibleObject,
        target: CraftTarget,
        pass: Pass,
    ) -> Result<()> {
        if self.categories.carries_own_category(&recipe) {
            debug!(recipe = %recipe.form_key, "Recipe already filed");
            self.report.already_filed += 1;
            return Ok(());
        }

        let lookup = self.classifier.find_station_category_tag(
            self.store,
            &self.known,
            &mut self.tags,
            &target,
        );
        let station_tag = match (lookup, pass) {
            (StationLookup::Found(tag), _) => tag,
            (StationLookup::Undetermined, Pass::First) => {
                debug!(recipe = %recipe.form_key, station = %target.form_key(), "Station undetermined, deferring");
                self.backlog.defer(recipe, target);
                return Ok(());
            }
            (StationLookup::Undetermined, Pass::Backlog) => {
                debug!(recipe = %recipe.form_key, "Station still undetermined, filing under misc");
                self.known.categories.misc.clone()
            }
        };

        let category = self.categories.resolve(self.store, &station_tag, &target)?;
        if move_to_category(
            self.store,
            &recipe.form_key,
            &self.known.placeholders(),
            &category,
        )? {
            self.report.patched += 1;
        }
        Ok(())
    }
}

/// Build the patch for a load order
///
/// Returns the output plugin and the run report; on error nothing is
/// returned, so a partial patch can never be saved.
pub fn build_patch(
    plugins: Vec<Plugin>,
    config: &PatcherConfig,
    now: DateTime<Utc>,
) -> Result<(Plugin, RunReport)> {
    let mut store = RecordStore::new(plugins, config.patch_file_name.clone());
    let report = Processor::new(&mut store, config)?.run_at(now)?;
    Ok((store.into_patch(), report))
}
