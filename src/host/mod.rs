// ABOUTME: Runtime host collaborator traits for deploying units.
// ABOUTME: Defines Deployable, DeployableFactory, Host, and the TokioHost implementation.

mod error;
mod exec;
mod tokio_host;

pub use error::{HostError, HostErrorKind};
pub use exec::ExecFactory;
pub use tokio_host::{DeploymentRecord, TokioHost};

use crate::config::DeployOptions;
use crate::types::DeploymentId;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from a unit's own start action.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("{0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A unit instance the host can deploy.
#[async_trait]
pub trait Deployable: Send + Sync {
    /// Start the unit. The deploy is complete when this resolves.
    async fn start(&self) -> Result<(), StartError>;
}

impl std::fmt::Debug for dyn Deployable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Deployable")
    }
}

/// What the host is asked to deploy.
pub enum DeployTarget {
    /// Opaque `scheme:payload` descriptor, interpreted by the host's
    /// registered factories. Never seen by the registry.
    Descriptor(String),

    /// A resolved instance, labeled with the name it was resolved under.
    Instance {
        name: String,
        instance: Arc<dyn Deployable>,
    },
}

impl DeployTarget {
    /// Human-readable label for logs and deployment records.
    pub fn label(&self) -> &str {
        match self {
            DeployTarget::Descriptor(s) => s,
            DeployTarget::Instance { name, .. } => name,
        }
    }
}

impl std::fmt::Debug for DeployTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployTarget::Descriptor(s) => f.debug_tuple("Descriptor").field(s).finish(),
            DeployTarget::Instance { name, .. } => {
                f.debug_struct("Instance").field("name", name).finish()
            }
        }
    }
}

/// Error from a descriptor factory rejecting its payload.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FactoryError(pub String);

/// Builds deployable instances from the payload part of a
/// `scheme:payload` descriptor.
pub trait DeployableFactory: Send + Sync {
    fn create(&self, payload: &str) -> Result<Arc<dyn Deployable>, FactoryError>;
}

/// The runtime that executes deploy actions and assigns completion
/// identifiers.
#[async_trait]
pub trait Host: Send + Sync {
    /// Deploy a target and resolve with its deployment identifier once the
    /// unit has started.
    async fn deploy(
        &self,
        target: DeployTarget,
        options: &DeployOptions,
    ) -> Result<DeploymentId, HostError>;

    /// Undeploy a previously deployed unit.
    async fn undeploy(&self, id: &DeploymentId) -> Result<(), HostError>;

    /// One-shot timer primitive. Resolves exactly once, after `duration`.
    async fn after(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
