// ABOUTME: Shared fakes for integration tests.
// ABOUTME: TagDeployable records start order into a shared log and can fail or hang.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use stagehand::host::{Deployable, StartError};
use std::sync::Arc;

pub type DeployLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> DeployLog {
    Arc::new(Mutex::new(Vec::new()))
}

enum Behavior {
    Succeed,
    Fail,
    Hang,
}

/// Deployable that pushes its tag into a shared log when started.
pub struct TagDeployable {
    tag: String,
    log: DeployLog,
    behavior: Behavior,
}

impl TagDeployable {
    pub fn succeeding(tag: &str, log: &DeployLog) -> Arc<Self> {
        Self::with_behavior(tag, log, Behavior::Succeed)
    }

    pub fn failing(tag: &str, log: &DeployLog) -> Arc<Self> {
        Self::with_behavior(tag, log, Behavior::Fail)
    }

    pub fn hanging(tag: &str, log: &DeployLog) -> Arc<Self> {
        Self::with_behavior(tag, log, Behavior::Hang)
    }

    fn with_behavior(tag: &str, log: &DeployLog, behavior: Behavior) -> Arc<Self> {
        Arc::new(TagDeployable {
            tag: tag.to_string(),
            log: Arc::clone(log),
            behavior,
        })
    }
}

#[async_trait]
impl Deployable for TagDeployable {
    async fn start(&self) -> Result<(), StartError> {
        self.log.lock().push(self.tag.clone());
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(StartError::Failed(format!("{} refused to start", self.tag))),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
