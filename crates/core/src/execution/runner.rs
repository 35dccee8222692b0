//! High-level task runner
//!
//! Executes the fixed `submittest` sequence with fail-fast semantics: a
//! notice line before each phase, abort on the first failing collaborator,
//! and a completion line only when every step succeeded.

use std::io::Write;

use colored::*;

use crate::config::ShipitConfig;
use crate::execution::command::CommandRunner;
use crate::params::SubmitParams;
use crate::steps::submittest_steps;
use crate::types::ShipitResult;

/// Runner for the `submittest` task.
///
/// The command runner is injected so tests can observe which collaborators
/// were invoked without touching a real repository; progress lines go to a
/// caller-supplied sink for the same reason.
pub struct SubmitRunner<'a> {
    executor: &'a dyn CommandRunner,
    config: &'a ShipitConfig,
}

impl<'a> SubmitRunner<'a> {
    pub fn new(executor: &'a dyn CommandRunner, config: &'a ShipitConfig) -> Self {
        Self { executor, config }
    }

    /// Run the sequence: check, commit, push.
    ///
    /// Each step blocks until its collaborator terminates. The first failure
    /// aborts the run and becomes its result; a commit already created is
    /// never rolled back when a later push fails.
    pub fn run<W: Write>(&self, params: &SubmitParams, out: &mut W) -> ShipitResult<()> {
        let steps = submittest_steps(self.config, params);
        let notices = [
            "Staging tracked changes and running checks".to_string(),
            format!("Committing work in progress: {}", params.message),
            format!("Pushing to {}/{}", self.config.remote, params.branch),
        ];

        for (step, notice) in steps.iter().zip(notices) {
            writeln!(out, "{} {}", "→".cyan().bold(), notice)?;
            self.executor.execute(step)?;
        }

        writeln!(
            out,
            "{} {}",
            "✓".green().bold(),
            "Submitted for testing".green()
        )?;
        Ok(())
    }
}
