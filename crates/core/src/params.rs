//! Overridable task parameters
//!
//! The `submittest` task takes two named parameters, both optional. When the
//! caller supplies no override the documented default is used verbatim.

use crate::types::{ShipitError, ShipitResult};

/// Default commit-message parameter value.
pub const DEFAULT_MESSAGE: &str = "Test: Work in Progress";

/// Default target-branch parameter value.
pub const DEFAULT_BRANCH: &str = "master";

/// Resolved parameter set for a single `submittest` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitParams {
    /// Commit message to announce. Note that the commit itself always uses a
    /// fixed literal message; see [`crate::steps::submittest_steps`].
    pub message: String,
    /// Branch to push to on the remote.
    pub branch: String,
}

impl Default for SubmitParams {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl SubmitParams {
    /// Apply a list of `NAME=value` override assignments.
    ///
    /// Recognized names are `MSG` and `BRANCH`. Unrecognized names are
    /// rejected rather than ignored, so a typo never silently falls back to
    /// a default.
    pub fn apply_overrides<S: AsRef<str>>(mut self, overrides: &[S]) -> ShipitResult<Self> {
        for assignment in overrides {
            let assignment = assignment.as_ref();
            let (name, value) = assignment.split_once('=').ok_or_else(|| {
                ShipitError::Config(format!(
                    "Invalid override '{}': expected NAME=value",
                    assignment
                ))
            })?;
            match name {
                "MSG" => self.message = value.to_string(),
                "BRANCH" => self.branch = value.to_string(),
                other => {
                    return Err(ShipitError::Config(format!(
                        "Unknown parameter '{}' (supported: MSG, BRANCH)",
                        other
                    )))
                }
            }
        }
        Ok(self)
    }
}
