// Library root: re-exports all modules so integration tests and the CLI
// binary share the same public API.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod league;
pub mod pipeline;
pub mod report;
pub mod stats;
