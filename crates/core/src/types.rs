use thiserror::Error;

/// The main error type for shipit operations
#[derive(Debug, Error)]
pub enum ShipitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// An external collaborator could not be started at all.
    #[error("Failed to spawn '{label}': {source}")]
    Spawn {
        label: String,
        source: std::io::Error,
    },

    /// An external collaborator ran and returned a non-success status.
    /// Carries the failing step's label and the status it returned.
    #[error("Step '{label}' failed with exit code {code}")]
    Step { label: String, code: i32 },
}

impl ShipitError {
    /// Map an error to the process exit status the task should return.
    ///
    /// A failed step propagates the collaborator's own exit code verbatim;
    /// every other error maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShipitError::Step { code, .. } => *code,
            _ => 1,
        }
    }

    /// True when the failing collaborator already printed its own
    /// diagnostics and no extra error line should be synthesized.
    pub fn is_step_failure(&self) -> bool {
        matches!(self, ShipitError::Step { .. })
    }
}

/// Result type alias for shipit operations
pub type ShipitResult<T> = Result<T, ShipitError>;
