use serde::{Deserialize, Serialize};

use crate::FormKey;

/// Behavior subgraph entry of a race
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_graph: Option<String>,
    /// Keywords that link furniture to this animation subgraph
    #[serde(default)]
    pub target_keywords: Vec<FormKey>,
}

/// Race (RACE); only the animation subgraphs are modelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub subgraphs: Vec<Subgraph>,
}
