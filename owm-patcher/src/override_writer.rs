//! Moves a recipe into its category by rewriting placeholder filters

use owm_common::records::ConstructibleObject;
use owm_common::{FormKey, RecordStore, Result};
use tracing::debug;

/// Replace every placeholder category of `recipe` with `category`
///
/// Works on the patch copy of the recipe, creating it on first write. A
/// recipe with no placeholder left is not touched and gets no override.
/// Returns true if the recipe was changed.
pub fn move_to_category(
    store: &mut RecordStore,
    recipe: &FormKey,
    placeholders: &[&FormKey],
    category: &FormKey,
) -> Result<bool> {
    let has_placeholder = |cobj: &ConstructibleObject| {
        cobj.categories
            .iter()
            .flatten()
            .any(|keyword| placeholders.contains(&keyword))
    };

    match store.resolve::<ConstructibleObject>(recipe) {
        Some(current) if has_placeholder(current) => {}
        _ => return Ok(false),
    }

    let cobj = store.get_or_add_override::<ConstructibleObject>(recipe)?;
    for keyword in cobj.categories.iter_mut().flatten() {
        if placeholders.contains(&&*keyword) {
            *keyword = category.clone();
        }
    }

    debug!(recipe = %recipe, category = %category, "Recipe moved to category");
    Ok(true)
}
