//! Order command implementation

use crate::load::load;
use anyhow::Result;
use shapegen_core::{DataModelObject, DependencyOrderer};
use std::path::Path;

/// Run the order command
pub fn run(model: &Path, settings: &Path, level_fixed: bool) -> Result<()> {
    let inputs = load(model, settings, &[], level_fixed)?;
    let service = inputs.settings.service_id()?;

    let units = DependencyOrderer::new(&inputs.graph, &service)?
        .require_operation_io(inputs.settings.require_operation_io)
        .order()?;

    println!("Declaration order for {}:", service);
    for line in format_order(&units) {
        println!("{}", line);
    }

    Ok(())
}

/// One numbered line per unit
pub fn format_order(units: &[DataModelObject]) -> Vec<String> {
    units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let marker = if unit.is_placeholder() {
                " [placeholder]"
            } else {
                ""
            };
            format!("{:>3}. {} ({}){}", i + 1, unit.name, unit.wire_type, marker)
        })
        .collect()
}

#[cfg(test)]
#[path = "order/order_tests.rs"]
mod order_tests;
