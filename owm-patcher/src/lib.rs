//! owm-patcher library interface
//!
//! Files workshop station recipes into Organized Workbench Menu categories.
//! Exposed as a library for integration testing; the binary only loads
//! plugins, runs [`build_patch`] and saves the result.

pub mod backlog;
pub mod categories;
pub mod classify;
pub mod config;
pub mod known;
pub mod override_writer;
pub mod processor;
pub mod stations;
pub mod summary;

pub use config::PatcherConfig;
pub use processor::{build_patch, Processor, RunReport};
