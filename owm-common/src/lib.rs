//! # OWM Common Library
//!
//! Shared code for the Organized Workbench Menu patcher including:
//! - Record model (keywords, recipes, furniture, quests, scripts)
//! - Layered record store with a copy-on-write patch overlay
//! - Editor ID sanitization
//! - Configuration loading
//! - Error types

pub mod config;
pub mod edid;
pub mod error;
pub mod form_key;
pub mod records;
pub mod script;
pub mod store;

pub use error::{Error, Result};
pub use form_key::FormKey;
pub use store::{Plugin, RecordStore};
