//! Step definitions for the `submittest` task
//!
//! A step is one ordered unit of external command execution. Steps run
//! strictly in declaration order and the whole run aborts on the first
//! failure.

use crate::config::ShipitConfig;
use crate::params::SubmitParams;

/// Commit message literal attached by the commit step. Deliberately
/// independent of the `MSG` parameter, which is only announced in the
/// progress output; see the repository design notes.
pub const COMMIT_LITERAL: &str = "submit & test";

/// How a step's command is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCommand {
    /// A command line run through `sh -c`.
    Shell(String),
    /// An explicit program-plus-arguments vector.
    Argv(Vec<String>),
}

impl StepCommand {
    /// Render the command as a single display line.
    pub fn display(&self) -> String {
        match self {
            StepCommand::Shell(cmd) => cmd.clone(),
            StepCommand::Argv(argv) => argv.join(" "),
        }
    }
}

/// One ordered unit of work: a display label plus the command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: &'static str,
    pub command: StepCommand,
}

impl Step {
    fn shell(label: &'static str, cmd: impl Into<String>) -> Self {
        Self {
            label,
            command: StepCommand::Shell(cmd.into()),
        }
    }

    fn argv<I, S>(label: &'static str, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label,
            command: StepCommand::Argv(argv.into_iter().map(Into::into).collect()),
        }
    }
}

/// Build the fixed three-command sequence for a `submittest` run:
/// the configured check command, a commit of all tracked modifications
/// (empty commits allowed), and a push to the configured remote.
pub fn submittest_steps(config: &ShipitConfig, params: &SubmitParams) -> Vec<Step> {
    vec![
        Step::shell("check", config.check.clone()),
        Step::argv(
            "commit",
            ["git", "commit", "-a", "--allow-empty", "-m", COMMIT_LITERAL],
        ),
        Step::argv(
            "push",
            [
                "git".to_string(),
                "push".to_string(),
                config.remote.clone(),
                params.branch.clone(),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_ordered_check_commit_push() {
        let config = ShipitConfig::default();
        let params = SubmitParams::default();
        let steps = submittest_steps(&config, &params);
        let labels: Vec<_> = steps.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["check", "commit", "push"]);
    }

    #[test]
    fn test_commit_uses_fixed_literal_not_message_parameter() {
        let config = ShipitConfig::default();
        let params = SubmitParams::default().apply_overrides(&["MSG=fix bug"]).unwrap();
        let steps = submittest_steps(&config, &params);
        match &steps[1].command {
            StepCommand::Argv(argv) => {
                assert_eq!(argv.last().map(String::as_str), Some(COMMIT_LITERAL));
                assert!(!argv.contains(&"fix bug".to_string()));
            }
            other => panic!("commit step should be an argv command, got {:?}", other),
        }
    }

    #[test]
    fn test_push_targets_remote_and_resolved_branch() {
        let config = ShipitConfig::default();
        let params = SubmitParams::default().apply_overrides(&["BRANCH=main"]).unwrap();
        let steps = submittest_steps(&config, &params);
        assert_eq!(
            steps[2].command,
            StepCommand::Argv(vec![
                "git".to_string(),
                "push".to_string(),
                "origin".to_string(),
                "main".to_string(),
            ])
        );
    }

    #[test]
    fn test_check_uses_configured_command_line() {
        let config = ShipitConfig {
            check: "cargo clippy".to_string(),
            ..ShipitConfig::default()
        };
        let steps = submittest_steps(&config, &SubmitParams::default());
        assert_eq!(steps[0].command, StepCommand::Shell("cargo clippy".to_string()));
        assert_eq!(steps[0].command.display(), "cargo clippy");
    }
}
