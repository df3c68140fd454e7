//! Model and settings loading shared by every command

use anyhow::{Context, Result};
use shapegen_core::{Backend, GeneratorSettings, ShapeGraph};
use shapegen_logging::ReloadHandle;
use std::path::Path;
use tracing::debug;

/// A loaded model with the settings that drive it
pub struct Inputs {
    pub graph: ShapeGraph,
    pub settings: GeneratorSettings,
}

/// Load settings then the model
///
/// A non-empty `backends` replaces the configured list. Unless the level was
/// fixed on the command line, the settings file's `logLevel` takes effect
/// before the model is read.
pub fn load(
    model: &Path,
    settings: &Path,
    backends: &[Backend],
    level_fixed: bool,
) -> Result<Inputs> {
    let mut settings = GeneratorSettings::from_file(settings)
        .with_context(|| format!("Failed to load settings: {:?}", settings))?;
    if !backends.is_empty() {
        settings.backends = backends.to_vec();
    }
    settings.validate().context("Invalid settings")?;

    if !level_fixed {
        ReloadHandle::global()
            .reload_level(settings.log_level()?)
            .map_err(anyhow::Error::msg)?;
    }

    let graph = ShapeGraph::from_file(model)
        .with_context(|| format!("Failed to load model: {:?}", model))?;
    debug!(shapes = graph.len(), "model loaded");

    Ok(Inputs { graph, settings })
}
