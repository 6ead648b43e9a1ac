//! owm-patcher - Organized Workbench Menu patch generator
//!
//! Reads a load order of plugin dumps (JSON, lowest priority first), files
//! every workshop station recipe into a submenu category and writes the
//! resulting patch plugin. Nothing is written if the run fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use owm_common::config::{load_toml_or_default, resolve_config_path};
use owm_common::Plugin;
use owm_patcher::{build_patch, PatcherConfig};

/// Command-line arguments for owm-patcher
#[derive(Parser, Debug)]
#[command(name = "owm-patcher")]
#[command(about = "Sorts workshop station recipes into Organized Workbench Menu categories")]
#[command(version)]
struct Args {
    /// Plugin dump, repeat in load order (lowest priority first)
    #[arg(short, long = "plugin", required = true)]
    plugins: Vec<PathBuf>,

    /// Where to write the patch plugin
    #[arg(short, long)]
    output: PathBuf,

    /// Config file (TOML)
    #[arg(short, long, env = "OWM_CONFIG")]
    config: Option<PathBuf>,

    /// Patch plugin file name, overrides the config
    #[arg(long)]
    patch_name: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref(), "OWM_CONFIG", "owm-patcher");
    let mut config: PatcherConfig =
        load_toml_or_default(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(patch_name) = args.patch_name {
        config.patch_file_name = patch_name;
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting owm-patcher {} ({}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => info!("Config: {}", path.display()),
        None => info!("Config: built-in defaults"),
    }

    let plugins = args
        .plugins
        .iter()
        .map(|path| {
            Plugin::load_json(path)
                .with_context(|| format!("Failed to load plugin {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    info!(plugins = plugins.len(), patch = %config.patch_file_name, "Load order read");

    let (patch, report) = build_patch(plugins, &config, Utc::now()).context("Patch run failed")?;

    patch
        .save_json(&args.output)
        .with_context(|| format!("Failed to write patch {}", args.output.display()))?;

    info!(
        records = patch.records.len(),
        patched = report.patched,
        created = report.created_categories.len(),
        "Patch written to {}",
        args.output.display()
    );
    if let Some(quest) = &report.summary {
        info!("Menu installer quest: {}", quest);
    }

    Ok(())
}
