//! Record model
//!
//! Every record carries a [`FormKey`] and an optional editor ID. The store keeps
//! records as the [`Record`] enum; [`MajorRecord`] provides typed access.

mod constructible;
mod form_list;
mod furniture;
mod item;
mod keyword;
mod quest;
mod race;

pub use constructible::ConstructibleObject;
pub use form_list::FormList;
pub use furniture::{BenchType, Furniture};
pub use item::Item;
pub use keyword::{Keyword, KeywordType};
pub use quest::{Quest, QuestData, VirtualMachineAdapter};
pub use race::{Race, Subgraph};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FormKey;

/// Record type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    Keyword,
    ConstructibleObject,
    Furniture,
    Item,
    Race,
    Quest,
    FormList,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Keyword => "KYWD",
            RecordKind::ConstructibleObject => "COBJ",
            RecordKind::Furniture => "FURN",
            RecordKind::Item => "MISC",
            RecordKind::Race => "RACE",
            RecordKind::Quest => "QUST",
            RecordKind::FormList => "FLST",
        };
        f.write_str(name)
    }
}

/// Any record held by a plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    Keyword(Keyword),
    ConstructibleObject(ConstructibleObject),
    Furniture(Furniture),
    Item(Item),
    Race(Race),
    Quest(Quest),
    FormList(FormList),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Keyword(_) => RecordKind::Keyword,
            Record::ConstructibleObject(_) => RecordKind::ConstructibleObject,
            Record::Furniture(_) => RecordKind::Furniture,
            Record::Item(_) => RecordKind::Item,
            Record::Race(_) => RecordKind::Race,
            Record::Quest(_) => RecordKind::Quest,
            Record::FormList(_) => RecordKind::FormList,
        }
    }

    pub fn form_key(&self) -> &FormKey {
        match self {
            Record::Keyword(r) => &r.form_key,
            Record::ConstructibleObject(r) => &r.form_key,
            Record::Furniture(r) => &r.form_key,
            Record::Item(r) => &r.form_key,
            Record::Race(r) => &r.form_key,
            Record::Quest(r) => &r.form_key,
            Record::FormList(r) => &r.form_key,
        }
    }

    pub fn editor_id(&self) -> Option<&str> {
        match self {
            Record::Keyword(r) => r.editor_id.as_deref(),
            Record::ConstructibleObject(r) => r.editor_id.as_deref(),
            Record::Furniture(r) => r.editor_id.as_deref(),
            Record::Item(r) => r.editor_id.as_deref(),
            Record::Race(r) => r.editor_id.as_deref(),
            Record::Quest(r) => r.editor_id.as_deref(),
            Record::FormList(r) => r.editor_id.as_deref(),
        }
    }
}

/// Typed view over [`Record`] variants
pub trait MajorRecord: Clone + Into<Record> + 'static {
    const KIND: RecordKind;

    fn form_key(&self) -> &FormKey;

    fn editor_id(&self) -> Option<&str>;

    /// Give the record a new identity (used when duplicating)
    fn set_identity(&mut self, form_key: FormKey, editor_id: Option<String>);

    fn from_record(record: &Record) -> Option<&Self>;

    fn from_record_mut(record: &mut Record) -> Option<&mut Self>;
}

macro_rules! major_record {
    ($ty:ident) => {
        impl MajorRecord for $ty {
            const KIND: RecordKind = RecordKind::$ty;

            fn form_key(&self) -> &FormKey {
                &self.form_key
            }

            fn editor_id(&self) -> Option<&str> {
                self.editor_id.as_deref()
            }

            fn set_identity(&mut self, form_key: FormKey, editor_id: Option<String>) {
                self.form_key = form_key;
                self.editor_id = editor_id;
            }

            fn from_record(record: &Record) -> Option<&Self> {
                match record {
                    Record::$ty(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_record_mut(record: &mut Record) -> Option<&mut Self> {
                match record {
                    Record::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Record {
            fn from(value: $ty) -> Self {
                Record::$ty(value)
            }
        }
    };
}

major_record!(Keyword);
major_record!(ConstructibleObject);
major_record!(Furniture);
major_record!(Item);
major_record!(Race);
major_record!(Quest);
major_record!(FormList);

/// What a recipe produces: a placeable station or an ordinary item
#[derive(Debug, Clone, PartialEq)]
pub enum CraftTarget {
    Furniture(Furniture),
    Item(Item),
}

impl CraftTarget {
    /// Resolve a record into a craft target, None for kinds a recipe cannot produce
    pub fn from_record(record: &Record) -> Option<Self> {
        match record {
            Record::Furniture(furniture) => Some(CraftTarget::Furniture(furniture.clone())),
            Record::Item(item) => Some(CraftTarget::Item(item.clone())),
            _ => None,
        }
    }

    pub fn form_key(&self) -> &FormKey {
        match self {
            CraftTarget::Furniture(f) => &f.form_key,
            CraftTarget::Item(i) => &i.form_key,
        }
    }

    pub fn as_furniture(&self) -> Option<&Furniture> {
        match self {
            CraftTarget::Furniture(f) => Some(f),
            CraftTarget::Item(_) => None,
        }
    }

    /// Display name, None if absent or empty
    pub fn display_name(&self) -> Option<&str> {
        let name = match self {
            CraftTarget::Furniture(f) => f.name.as_deref(),
            CraftTarget::Item(i) => i.name.as_deref(),
        };
        name.filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_is_tagged() {
        let record: Record = Keyword {
            form_key: FormKey::new(0x800, "Test.esp"),
            editor_id: Some("MyKeyword".to_string()),
            name: None,
            kind: KeywordType::RecipeFilter,
        }
        .into();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Keyword");
        assert_eq!(json["form_key"], "000800:Test.esp");
        assert_eq!(json["kind"], "RecipeFilter");

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_downcast_checks_kind() {
        let record: Record = Item {
            form_key: FormKey::new(0x801, "Test.esp"),
            editor_id: None,
            name: Some("Wrench".to_string()),
        }
        .into();

        assert!(Item::from_record(&record).is_some());
        assert!(Keyword::from_record(&record).is_none());
        assert_eq!(record.kind(), RecordKind::Item);
    }

    #[test]
    fn test_display_name_ignores_empty() {
        let target = CraftTarget::Item(Item {
            form_key: FormKey::new(0x801, "Test.esp"),
            editor_id: None,
            name: Some(String::new()),
        });
        assert_eq!(target.display_name(), None);
        assert!(target.as_furniture().is_none());
    }
}
