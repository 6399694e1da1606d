// ABOUTME: Error types for the orchestration run.
// ABOUTME: One variant per failure class; every variant is fatal to the run.

use crate::host::HostError;
use crate::registry::RegistryError;
use std::time::Duration;
use thiserror::Error;

/// Errors that terminate a deployment run.
///
/// The first error wins: the driver short-circuits and no further units are
/// attempted. There is no partial-success outcome.
#[derive(Debug, Error)]
pub enum OrchestrateError {
    /// A unit descriptor could not be resolved to a deployable instance.
    #[error("failed to resolve unit {descriptor:?}: {source}")]
    Resolution {
        descriptor: String,
        #[source]
        source: RegistryError,
    },

    /// Default construction was attempted after a lookup miss and also
    /// failed. Both errors are carried so the root cause is not lost.
    #[error(
        "fallback construction for {descriptor:?} failed: {construction} (lookup failed first: {lookup})"
    )]
    FallbackConstruction {
        descriptor: String,
        #[source]
        construction: RegistryError,
        lookup: RegistryError,
    },

    /// The host rejected or failed a deploy call.
    #[error("deploy of {descriptor:?} failed: {source}")]
    Deploy {
        descriptor: String,
        #[source]
        source: HostError,
    },

    /// The global deadline fired before the run completed.
    #[error("deployment run timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// The spawned deployment task panicked or was cancelled.
    #[error("deployment task aborted: {0}")]
    Aborted(String),
}
