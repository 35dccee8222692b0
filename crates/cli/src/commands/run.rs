use std::path::Path;

use anyhow::Result;
use shipit_core::config::load_config;
use shipit_core::execution::{ProcessRunner, SubmitRunner};

pub fn execute(workspace: &Path, overrides: &[String]) -> Result<()> {
    let config = load_config(workspace)?;
    let params = config.params().apply_overrides(overrides)?;

    let executor = ProcessRunner::new(workspace.to_path_buf());
    let runner = SubmitRunner::new(&executor, &config);
    runner.run(&params, &mut std::io::stdout())?;

    Ok(())
}
