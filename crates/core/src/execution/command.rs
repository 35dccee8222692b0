//! Command execution
//!
//! External collaborators (the check tool and the version-control client) are
//! reached through the [`CommandRunner`] trait so tests can substitute fakes
//! without touching a real repository.

use std::path::PathBuf;
use std::process::Command;

use crate::steps::{Step, StepCommand};
use crate::types::{ShipitError, ShipitResult};

/// Injected capability for running one step's external command.
pub trait CommandRunner {
    /// Execute the step's command to completion and return `Ok(())` only on
    /// a success status. The child's own output streams are not captured.
    fn execute(&self, step: &Step) -> ShipitResult<()>;
}

/// Real command runner backed by `std::process::Command`.
///
/// Commands run in the workspace root with inherited stdio, so collaborator
/// diagnostics reach the terminal unreformatted.
pub struct ProcessRunner {
    workspace_root: PathBuf,
}

impl ProcessRunner {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    fn build_command(&self, step: &Step) -> ShipitResult<Command> {
        let mut command = match &step.command {
            StepCommand::Shell(cmd) => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(cmd);
                command
            }
            StepCommand::Argv(argv) => {
                let (program, args) = argv.split_first().ok_or_else(|| {
                    ShipitError::Config(format!("Step '{}' has no command to execute", step.label))
                })?;
                let mut command = Command::new(program);
                command.args(args);
                command
            }
        };
        command.current_dir(&self.workspace_root);
        Ok(command)
    }
}

impl CommandRunner for ProcessRunner {
    fn execute(&self, step: &Step) -> ShipitResult<()> {
        let status = self
            .build_command(step)?
            .status()
            .map_err(|e| ShipitError::Spawn {
                label: step.label.to_string(),
                source: e,
            })?;

        if !status.success() {
            return Err(ShipitError::Step {
                label: step.label.to_string(),
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}
