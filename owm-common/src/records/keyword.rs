use serde::{Deserialize, Serialize};

use crate::FormKey;

/// Keyword classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordType {
    #[default]
    None,
    ComponentTechLevel,
    AttachPoint,
    ComponentProperty,
    InstantiationFilter,
    ModAssociation,
    Sound,
    AnimArchetype,
    FunctionCall,
    /// Crafting menu category
    RecipeFilter,
    AttractionType,
    DialogueSubtype,
    QuestTarget,
    AnimFlavor,
    AnimGender,
    AnimFaceArchetype,
    QuestGroup,
    AnimInjured,
    DispelEffect,
}

/// Keyword (KYWD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    /// Display name, shown as the submenu title for recipe filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: KeywordType,
}
