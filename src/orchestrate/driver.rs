// ABOUTME: Sequential deployment driver: resolve each unit and deploy in order.
// ABOUTME: Primary unit first, then the merged list; first failure short-circuits.

use std::sync::Arc;

use crate::config::{Config, UnitDeploy};
use crate::host::{DeployTarget, Deployable, Host};
use crate::registry::Registry;
use crate::types::DeploymentId;

use super::deadline;
use super::error::OrchestrateError;
use super::merge::merge_units;

/// Label used for the primary unit in logs and the run summary.
const PRIMARY_LABEL: &str = "primary";

/// Outcome of a successful run: every deployed unit with its assigned id,
/// in deployment order.
#[derive(Debug)]
pub struct RunSummary {
    pub deployed: Vec<(String, DeploymentId)>,
}

impl RunSummary {
    pub fn count(&self) -> usize {
        self.deployed.len()
    }
}

/// Drives one startup deployment run to completion.
///
/// Deployments are issued strictly one after another: a unit's deploy is
/// only started once the previous unit's result is known, and the first
/// failure aborts the rest. The orchestrator holds no mutable shared state;
/// registry lookups are read-only and the host is assumed safe for
/// concurrent access.
pub struct Orchestrator<R, H> {
    config: Config,
    registry: Arc<R>,
    host: Arc<H>,
    primary: Option<Arc<dyn Deployable>>,
}

impl<R, H> Orchestrator<R, H>
where
    R: Registry + 'static,
    H: Host + 'static,
{
    pub fn new(config: Config, registry: Arc<R>, host: Arc<H>) -> Self {
        Orchestrator {
            config,
            registry,
            host,
            primary: None,
        }
    }

    /// Provide the primary unit instance. It is deployed first, before the
    /// ordered list, with the options from `primary:` in config.
    pub fn with_primary(mut self, unit: Arc<dyn Deployable>) -> Self {
        self.primary = Some(unit);
        self
    }

    /// Run the whole deployment sequence, racing it against the global
    /// deadline when one is configured. Resolves once the run has
    /// succeeded, failed, or timed out.
    pub async fn run(self) -> Result<RunSummary, OrchestrateError> {
        match self.config.deadline() {
            Some(limit) => {
                let host = Arc::clone(&self.host);
                deadline::bounded(host, limit, self.drive()).await
            }
            None => self.drive().await,
        }
    }

    async fn drive(self) -> Result<RunSummary, OrchestrateError> {
        let mut summary = RunSummary { deployed: Vec::new() };

        self.deploy_primary(&mut summary).await?;

        let units = merge_units(self.registry.declared_units(), self.config.units.clone());
        tracing::debug!(count = units.len(), "deploying ordered units");

        for unit in units {
            let target = self.resolve(&unit)?;
            let id = self
                .host
                .deploy(target, &unit.options)
                .await
                .map_err(|source| OrchestrateError::Deploy {
                    descriptor: unit.descriptor.clone(),
                    source,
                })?;
            summary.deployed.push((unit.descriptor, id));
        }

        tracing::info!(count = summary.count(), "deployment run complete");
        Ok(summary)
    }

    async fn deploy_primary(&self, summary: &mut RunSummary) -> Result<(), OrchestrateError> {
        if !self.config.primary.enabled {
            tracing::info!("primary unit disabled, skipping");
            return Ok(());
        }
        let Some(instance) = self.primary.clone() else {
            tracing::info!("no primary unit provided, skipping");
            return Ok(());
        };

        let target = DeployTarget::Instance {
            name: PRIMARY_LABEL.to_string(),
            instance,
        };
        let id = self
            .host
            .deploy(target, &self.config.primary)
            .await
            .map_err(|source| OrchestrateError::Deploy {
                descriptor: PRIMARY_LABEL.to_string(),
                source,
            })?;
        summary.deployed.push((PRIMARY_LABEL.to_string(), id));
        Ok(())
    }

    /// Resolve a unit declaration to something the host can deploy.
    ///
    /// Descriptors containing `:` are opaque and bypass the registry
    /// entirely. Plain identifiers resolve as an instance name first, then
    /// as a type name (with optional qualifier); a lookup miss on a known
    /// type falls back to default construction, and a fallback failure
    /// carries both errors.
    fn resolve(&self, unit: &UnitDeploy) -> Result<DeployTarget, OrchestrateError> {
        let descriptor = &unit.descriptor;

        if unit.is_opaque() {
            return Ok(DeployTarget::Descriptor(descriptor.clone()));
        }

        if self.registry.contains_instance(descriptor) {
            let instance =
                self.registry
                    .instance(descriptor)
                    .map_err(|source| OrchestrateError::Resolution {
                        descriptor: descriptor.clone(),
                        source,
                    })?;
            return Ok(DeployTarget::Instance {
                name: descriptor.clone(),
                instance,
            });
        }

        match self
            .registry
            .instance_of_type(descriptor, unit.qualifier.as_deref())
        {
            Ok(instance) => Ok(DeployTarget::Instance {
                name: descriptor.clone(),
                instance,
            }),
            Err(lookup) if lookup.triggers_fallback() => {
                tracing::debug!(
                    descriptor = %descriptor,
                    %lookup,
                    "no registered instance, falling back to default construction"
                );
                match self.registry.construct(descriptor) {
                    Ok(instance) => Ok(DeployTarget::Instance {
                        name: descriptor.clone(),
                        instance,
                    }),
                    Err(construction) => Err(OrchestrateError::FallbackConstruction {
                        descriptor: descriptor.clone(),
                        construction,
                        lookup,
                    }),
                }
            }
            Err(source) => Err(OrchestrateError::Resolution {
                descriptor: descriptor.clone(),
                source,
            }),
        }
    }
}
