use serde::{Deserialize, Serialize};

use crate::FormKey;

/// Form list (FLST)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormList {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub items: Vec<FormKey>,
}
