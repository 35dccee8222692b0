//! Task execution module
//!
//! Command execution against external collaborators plus the sequencing
//! runner that drives the `submittest` task.

pub mod command;
pub mod runner;

pub use command::{CommandRunner, ProcessRunner};
pub use runner::SubmitRunner;
