use serde::{Deserialize, Serialize};

use crate::FormKey;

/// Constructible object (COBJ), a crafting recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructibleObject {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    /// Record produced by the recipe (CNAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_object: Option<FormKey>,
    /// Keyword of the station the recipe is crafted at (BNAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbench_keyword: Option<FormKey>,
    /// Menu filter keywords (FNAM); order is not significant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<FormKey>>,
}
