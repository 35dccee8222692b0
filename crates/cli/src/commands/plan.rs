use std::path::Path;

use anyhow::Result;
use colored::*;
use shipit_core::config::load_config;
use shipit_core::steps::submittest_steps;

pub fn execute(workspace: &Path, overrides: &[String]) -> Result<()> {
    let config = load_config(workspace)?;
    let params = config.params().apply_overrides(overrides)?;

    println!("{} {}", "Execution plan for".bold(), "submittest".cyan());

    println!("\n{}:", "Execution order".bold());
    for (i, step) in submittest_steps(&config, &params).iter().enumerate() {
        println!("  {}. {}: {}", i + 1, step.label, step.command.display());
    }

    Ok(())
}
