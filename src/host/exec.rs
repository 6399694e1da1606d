// ABOUTME: Descriptor factory that deploys a unit by running a child process.
// ABOUTME: exec:payload runs the payload as a command and succeeds on exit 0.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

use super::{Deployable, DeployableFactory, FactoryError, StartError};

/// Factory for `exec:` descriptors. The payload is a whitespace-separated
/// command line; the deploy completes when the process exits.
pub struct ExecFactory;

impl DeployableFactory for ExecFactory {
    fn create(&self, payload: &str) -> Result<Arc<dyn Deployable>, FactoryError> {
        let mut parts = payload.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| FactoryError("empty exec payload".to_string()))?;
        Ok(Arc::new(ExecDeployable {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        }))
    }
}

struct ExecDeployable {
    program: String,
    args: Vec<String>,
}

#[async_trait]
impl Deployable for ExecDeployable {
    async fn start(&self) -> Result<(), StartError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                program = %self.program,
                code = ?output.status.code(),
                %stderr,
                "exec unit failed"
            );
            Err(StartError::Failed(format!(
                "{} exited with {:?}",
                self.program,
                output.status.code()
            )))
        }
    }
}
