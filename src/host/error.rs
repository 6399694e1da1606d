// ABOUTME: Host error types with SNAFU pattern.
// ABOUTME: Unifies factory, start, and bookkeeping failures for programmatic handling.

use snafu::Snafu;
use std::time::Duration;

use super::{FactoryError, StartError};

/// Unified error for deploy and undeploy operations on a host.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum HostError {
    #[snafu(display("unit failed to start: {source}"))]
    Start { source: StartError },

    #[snafu(display("no factory registered for descriptor scheme {scheme:?}"))]
    UnknownScheme { scheme: String },

    #[snafu(display("factory for scheme {scheme:?} rejected payload: {source}"))]
    Factory {
        scheme: String,
        source: FactoryError,
    },

    #[snafu(display("deploy timed out after {limit:?}"))]
    DeployTimedOut { limit: Duration },

    #[snafu(display("no deployment with id {id}"))]
    NotDeployed { id: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    /// The unit's own start action failed.
    StartFailed,
    /// Descriptor scheme has no registered factory.
    UnknownScheme,
    /// A factory rejected its payload.
    FactoryRejected,
    /// Per-unit deploy timeout elapsed.
    DeployTimedOut,
    /// Deployment id unknown to the host.
    NotDeployed,
}

impl HostError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> HostErrorKind {
        match self {
            HostError::Start { .. } => HostErrorKind::StartFailed,
            HostError::UnknownScheme { .. } => HostErrorKind::UnknownScheme,
            HostError::Factory { .. } => HostErrorKind::FactoryRejected,
            HostError::DeployTimedOut { .. } => HostErrorKind::DeployTimedOut,
            HostError::NotDeployed { .. } => HostErrorKind::NotDeployed,
        }
    }
}
