//! Generate command implementation

use crate::load::load;
use crate::manifest::{FileManifest, WriteOutcome};
use anyhow::{Context, Result};
use shapegen_core::Backend;
use shapegen_logging::DiagnosticsCollector;
use std::path::Path;
use tracing::info;

/// Run the generate command
///
/// Every unit is generated in memory before anything is written, so a
/// failing model leaves the output directory untouched.
pub fn run(
    model: &Path,
    settings: &Path,
    output: &Path,
    backends: &[Backend],
    level_fixed: bool,
) -> Result<()> {
    let inputs = load(model, settings, backends, level_fixed)?;

    println!(
        "Generating {} for: {}",
        inputs.settings.service_shape_id,
        backend_list(&inputs.settings.backends)
    );

    let units = shapegen_codegen::generate(&inputs.graph, &inputs.settings)
        .context("Generation failed")?;
    info!(units = units.len(), output = %output.display(), "writing output");

    let mut manifest = FileManifest::new(output, inputs.settings.no_clobber);
    manifest.write_units(&units)?;

    for line in summary(&manifest, DiagnosticsCollector::global().warning_count()) {
        println!("{}", line);
    }

    Ok(())
}

pub fn backend_list(backends: &[Backend]) -> String {
    backends
        .iter()
        .map(Backend::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary lines printed after a successful run
pub fn summary(manifest: &FileManifest, warnings: usize) -> Vec<String> {
    vec![
        format!(
            "✓ Files: {} ({} created, {} overwritten, {} skipped)",
            manifest.entries().len(),
            manifest.count(WriteOutcome::Created),
            manifest.count(WriteOutcome::Overwritten),
            manifest.count(WriteOutcome::Skipped),
        ),
        format!("✓ Warnings: {}", warnings),
    ]
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
