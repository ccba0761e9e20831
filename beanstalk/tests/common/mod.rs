//! Recording collaborator doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use beanstalk::{
    CloudEnvironmentClient, DeployError, DeployEvent, DeployResult, EnvironmentInfo,
    MonitoringNotifier, VersionDetails,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Upload { path: PathBuf, remote: String },
    CreateVersion { label: String, description: String, remote: String },
    GetVersion { label: String },
    UpdateEnvironment { environment: String, version: String },
    WaitReady { environment: String },
    GetEnvironmentInfo { environment: String },
    Notify { environment: String, version: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    CreateVersion,
    GetVersion,
    UpdateEnvironment,
    WaitReady,
    GetEnvironmentInfo,
    Notify,
}

impl Call {
    pub fn step(&self) -> Step {
        match self {
            Call::Upload { .. } => Step::Upload,
            Call::CreateVersion { .. } => Step::CreateVersion,
            Call::GetVersion { .. } => Step::GetVersion,
            Call::UpdateEnvironment { .. } => Step::UpdateEnvironment,
            Call::WaitReady { .. } => Step::WaitReady,
            Call::GetEnvironmentInfo { .. } => Step::GetEnvironmentInfo,
            Call::Notify { .. } => Step::Notify,
        }
    }
}

/// Call log shared by the cloud double and the notifier double so the
/// relative order of both is visible.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<Step> {
        self.calls().iter().map(Call::step).collect()
    }
}

/// In-memory platform. Environments start on the versions given to
/// `with_environment`; `fail_at` makes one step return an error instead.
pub struct RecordingCloud {
    log: CallLog,
    environments: Mutex<HashMap<String, String>>,
    failure: Mutex<Option<Step>>,
}

impl RecordingCloud {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            environments: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn with_environment(self, name: &str, version: &str) -> Self {
        self.environments
            .lock()
            .unwrap()
            .insert(name.to_string(), version.to_string());
        self
    }

    pub fn fail_at(self, step: Step) -> Self {
        *self.failure.lock().unwrap() = Some(step);
        self
    }

    pub fn current_version(&self, environment: &str) -> Option<String> {
        self.environments.lock().unwrap().get(environment).cloned()
    }

    fn check(&self, step: Step) -> DeployResult<()> {
        if *self.failure.lock().unwrap() == Some(step) {
            return Err(DeployError::Platform {
                message: format!("{:?} failed", step),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CloudEnvironmentClient for RecordingCloud {
    async fn upload_archive(&self, local_path: &Path, remote_name: &str) -> DeployResult<()> {
        self.log.push(Call::Upload {
            path: local_path.to_path_buf(),
            remote: remote_name.to_string(),
        });
        if *self.failure.lock().unwrap() == Some(Step::Upload) {
            return Err(DeployError::Upload {
                path: local_path.to_path_buf(),
                message: "network".to_string(),
            });
        }
        Ok(())
    }

    async fn create_application_version(
        &self,
        version_label: &str,
        description: &str,
        remote_name: &str,
    ) -> DeployResult<VersionDetails> {
        self.log.push(Call::CreateVersion {
            label: version_label.to_string(),
            description: description.to_string(),
            remote: remote_name.to_string(),
        });
        self.check(Step::CreateVersion)?;
        Ok(VersionDetails::new(version_label)
            .with_description(description)
            .with_source_bundle("artifacts", remote_name))
    }

    async fn get_application_version(&self, version_label: &str) -> DeployResult<VersionDetails> {
        self.log.push(Call::GetVersion {
            label: version_label.to_string(),
        });
        self.check(Step::GetVersion)?;
        Ok(VersionDetails::new(version_label).with_status("PROCESSED"))
    }

    async fn update_environment_version(
        &self,
        environment: &str,
        version_label: &str,
    ) -> DeployResult<()> {
        self.log.push(Call::UpdateEnvironment {
            environment: environment.to_string(),
            version: version_label.to_string(),
        });
        self.check(Step::UpdateEnvironment)?;
        self.environments
            .lock()
            .unwrap()
            .insert(environment.to_string(), version_label.to_string());
        Ok(())
    }

    async fn wait_environment_ready(&self, environment: &str) -> DeployResult<()> {
        // Give other in-flight operations a chance to run first.
        tokio::task::yield_now().await;
        self.log.push(Call::WaitReady {
            environment: environment.to_string(),
        });
        if *self.failure.lock().unwrap() == Some(Step::WaitReady) {
            return Err(DeployError::EnvironmentNotReady {
                environment: environment.to_string(),
                status: "Updating".to_string(),
            });
        }
        Ok(())
    }

    async fn get_environment_info(&self, environment: &str) -> DeployResult<EnvironmentInfo> {
        self.log.push(Call::GetEnvironmentInfo {
            environment: environment.to_string(),
        });
        self.check(Step::GetEnvironmentInfo)?;
        let version = self.current_version(environment).ok_or_else(|| {
            DeployError::EnvironmentNotFound {
                environment: environment.to_string(),
            }
        })?;
        Ok(EnvironmentInfo::new(environment, version)
            .with_status("Ready")
            .with_health("Green"))
    }
}

pub struct RecordingNotifier {
    log: CallLog,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail: false }
    }

    pub fn failing(log: CallLog) -> Self {
        Self { log, fail: true }
    }
}

#[async_trait]
impl MonitoringNotifier for RecordingNotifier {
    async fn notify_deploy(&self, event: &DeployEvent) -> DeployResult<()> {
        self.log.push(Call::Notify {
            environment: event.environment.clone(),
            version: event.version.clone(),
        });
        if self.fail {
            return Err(DeployError::Notification {
                message: "401 Unauthorized".to_string(),
            });
        }
        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "recording"
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
