// ABOUTME: Core orchestration: unit list merging, the sequential driver,
// ABOUTME: and the global deadline guard.

mod deadline;
mod driver;
mod error;
mod merge;

pub use driver::{Orchestrator, RunSummary};
pub use error::OrchestrateError;
pub use merge::merge_units;
