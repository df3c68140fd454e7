//! Check command implementation

use crate::generate::backend_list;
use crate::load::{Inputs, load};
use anyhow::Result;
use shapegen_core::DependencyOrderer;
use std::path::Path;

/// Run the check command
pub fn run(model: &Path, settings: &Path, level_fixed: bool) -> Result<()> {
    println!("Checking model: {}", model.display());

    let inputs = load(model, settings, &[], level_fixed)?;
    for line in report(&inputs)? {
        println!("{}", line);
    }
    println!("\nModel and settings are valid!");

    Ok(())
}

/// Validate the inputs end to end and describe them
///
/// Generation runs in memory so unsupported shapes are caught here too.
pub fn report(inputs: &Inputs) -> Result<Vec<String>> {
    let Inputs { graph, settings } = inputs;
    let service_id = settings.service_id()?;
    let service = graph.service(&service_id)?;
    let operations = graph.service_operations(&service_id)?;
    let streaming = operations.iter().filter(|o| o.has_streaming()).count();

    let order = DependencyOrderer::new(graph, &service_id)?
        .require_operation_io(settings.require_operation_io)
        .order()?;
    let units = shapegen_codegen::generate(graph, settings)?;

    let version = service
        .version
        .as_deref()
        .map(|v| format!(" v{}", v))
        .unwrap_or_default();

    Ok(vec![
        format!("✓ Service: {}{}", service.id, version),
        format!("✓ Shapes: {}", graph.len()),
        format!("✓ Operations: {} ({} streaming)", operations.len(), streaming),
        format!("✓ Declaration units: {}", order.len()),
        format!("✓ Backends: {}", backend_list(&settings.backends)),
        format!("✓ Output units: {}", units.len()),
    ])
}
