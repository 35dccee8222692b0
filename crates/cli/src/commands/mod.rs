pub mod matcher;
pub mod plan;
pub mod run;
