// ABOUTME: Concrete host that runs deployables on the tokio runtime.
// ABOUTME: Resolves scheme:payload descriptors through registered factories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::DeployOptions;
use crate::types::DeploymentId;

use super::{DeployTarget, DeployableFactory, Host, HostError};

/// Bookkeeping entry for a completed deploy.
#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    /// Descriptor or resolved name the unit was deployed under.
    pub label: String,
    pub deployed_at: DateTime<Utc>,
}

/// Host backed by the tokio runtime.
///
/// Each deploy awaits the unit's own start action, optionally bounded by the
/// unit's deploy timeout, then records the assigned deployment id. Factories
/// for descriptor schemes are registered before the run begins.
#[derive(Default)]
pub struct TokioHost {
    factories: HashMap<String, Arc<dyn DeployableFactory>>,
    records: Mutex<HashMap<DeploymentId, DeploymentRecord>>,
    next_id: AtomicU64,
}

impl TokioHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a descriptor scheme (the part before `:`).
    pub fn register_factory(
        &mut self,
        scheme: impl Into<String>,
        factory: Arc<dyn DeployableFactory>,
    ) {
        self.factories.insert(scheme.into(), factory);
    }

    /// Snapshot of all live deployments.
    pub fn deployments(&self) -> Vec<(DeploymentId, DeploymentRecord)> {
        self.records
            .lock()
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    fn assign_id(&self) -> DeploymentId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        DeploymentId::new(format!("deploy-{n:08x}"))
    }
}

#[async_trait]
impl Host for TokioHost {
    async fn deploy(
        &self,
        target: DeployTarget,
        options: &DeployOptions,
    ) -> Result<DeploymentId, HostError> {
        let label = target.label().to_string();

        let deployable = match target {
            DeployTarget::Instance { instance, .. } => instance,
            DeployTarget::Descriptor(descriptor) => {
                let (scheme, payload) =
                    descriptor
                        .split_once(':')
                        .ok_or_else(|| HostError::UnknownScheme {
                            scheme: descriptor.clone(),
                        })?;
                let factory =
                    self.factories
                        .get(scheme)
                        .ok_or_else(|| HostError::UnknownScheme {
                            scheme: scheme.to_string(),
                        })?;
                factory
                    .create(payload)
                    .map_err(|source| HostError::Factory {
                        scheme: scheme.to_string(),
                        source,
                    })?
            }
        };

        let start = deployable.start();
        let started = match options.timeout {
            Some(limit) => tokio::time::timeout(limit, start)
                .await
                .map_err(|_| HostError::DeployTimedOut { limit })?,
            None => start.await,
        };
        started.map_err(|source| HostError::Start { source })?;

        let id = self.assign_id();
        self.records.lock().insert(
            id.clone(),
            DeploymentRecord {
                label: label.clone(),
                deployed_at: Utc::now(),
            },
        );
        tracing::info!(%id, unit = %label, "deployed");
        Ok(id)
    }

    async fn undeploy(&self, id: &DeploymentId) -> Result<(), HostError> {
        match self.records.lock().remove(id) {
            Some(record) => {
                tracing::info!(%id, unit = %record.label, "undeployed");
                Ok(())
            }
            None => Err(HostError::NotDeployed { id: id.to_string() }),
        }
    }
}
