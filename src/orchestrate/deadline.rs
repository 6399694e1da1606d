// ABOUTME: Global deadline guard racing the deployment chain against a timer.
// ABOUTME: A timer win forces a timeout outcome; the chain itself is never aborted.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::host::Host;

use super::driver::RunSummary;
use super::error::OrchestrateError;

/// Race the deployment chain against the host's one-shot timer.
///
/// The chain runs as its own task, so when the timer fires first only the
/// observed outcome changes: the detached chain keeps running and its
/// eventual result is discarded. Timeout means "stop waiting", not "abort
/// the in-flight unit". If the chain finishes first the timer is simply
/// dropped and never fires.
pub(crate) async fn bounded<H, F>(
    host: Arc<H>,
    limit: Duration,
    chain: F,
) -> Result<RunSummary, OrchestrateError>
where
    H: Host + 'static,
    F: Future<Output = Result<RunSummary, OrchestrateError>> + Send + 'static,
{
    let mut handle = tokio::spawn(chain);

    tokio::select! {
        outcome = &mut handle => match outcome {
            Ok(result) => result,
            Err(join) => Err(OrchestrateError::Aborted(join.to_string())),
        },
        _ = host.after(limit) => {
            tracing::error!(?limit, "deployment run exceeded deadline");
            Err(OrchestrateError::Timeout { limit })
        }
    }
}
