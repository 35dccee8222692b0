//! shipit core library
//!
//! Business logic for the shipit submit-and-test tool: a single linear task
//! (`submittest`) that runs a static check, commits all tracked
//! modifications, and pushes to a remote branch, aborting on the first
//! failing command.
//!
//! ## Architecture
//!
//! - [`config`] - Workspace configuration (`.shipit.yml`) and defaults
//! - [`params`] - Overridable task parameters (`MSG`, `BRANCH`)
//! - [`steps`] - The fixed ordered step sequence
//! - [`execution`] - Command execution and the sequencing runner
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shipit_core::config::ShipitConfig;
//! use shipit_core::execution::{ProcessRunner, SubmitRunner};
//! use shipit_core::params::SubmitParams;
//! use std::path::PathBuf;
//!
//! # fn example() -> shipit_core::types::ShipitResult<()> {
//! let config = ShipitConfig::default();
//! let executor = ProcessRunner::new(PathBuf::from("."));
//! let runner = SubmitRunner::new(&executor, &config);
//! runner.run(&SubmitParams::default(), &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod execution;
pub mod params;
pub mod steps;
pub mod types;

// Re-export the main types for easier usage
pub use execution::{CommandRunner, ProcessRunner, SubmitRunner};
pub use types::{ShipitError, ShipitResult};
