//! Recipes deferred to the second pass

use owm_common::records::{ConstructibleObject, CraftTarget};

/// A station recipe whose category could not be decided yet
#[derive(Debug, Clone)]
pub struct Deferred {
    pub recipe: ConstructibleObject,
    pub target: CraftTarget,
}

/// Ordered, drained exactly once
#[derive(Debug, Default)]
pub struct Backlog {
    entries: Vec<Deferred>,
    total: usize,
}

impl Backlog {
    pub fn defer(&mut self, recipe: ConstructibleObject, target: CraftTarget) {
        self.total += 1;
        self.entries.push(Deferred { recipe, target });
    }

    /// Take every entry in deferral order
    pub fn drain(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.entries)
    }

    /// Number of deferrals over the backlog's lifetime
    pub fn total_deferred(&self) -> usize {
        self.total
    }
}
