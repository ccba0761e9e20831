use crate::config::{AwsConfig, NewrelicConfig};
use crate::types::{DeployEvent, EnvironmentInfo, VersionDetails};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Upload of {} failed: {message}", .path.display())]
    Upload { path: PathBuf, message: String },

    #[error("Platform rejected request: {message}")]
    Platform { message: String },

    #[error("Application version not found: {version}")]
    VersionNotFound { version: String },

    #[error("Environment not found: {environment}")]
    EnvironmentNotFound { environment: String },

    #[error("Environment {environment} did not become ready (status: {status})")]
    EnvironmentNotReady { environment: String, status: String },

    #[error("Deploy notification failed: {message}")]
    Notification { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

pub type DeployResult<T> = Result<T, DeployError>;

/// The cloud platform as seen by the deployer. Implementations wrap the
/// provider SDK; polling and any timeout for `wait_environment_ready` live
/// behind this trait.
#[async_trait]
pub trait CloudEnvironmentClient: Send + Sync {
    async fn upload_archive(&self, local_path: &Path, remote_name: &str) -> DeployResult<()>;

    async fn create_application_version(
        &self,
        version_label: &str,
        description: &str,
        remote_name: &str,
    ) -> DeployResult<VersionDetails>;

    async fn get_application_version(&self, version_label: &str) -> DeployResult<VersionDetails>;

    async fn update_environment_version(
        &self,
        environment: &str,
        version_label: &str,
    ) -> DeployResult<()>;

    async fn wait_environment_ready(&self, environment: &str) -> DeployResult<()>;

    async fn get_environment_info(&self, environment: &str) -> DeployResult<EnvironmentInfo>;
}

/// Records a deploy marker with an external APM service.
#[async_trait]
pub trait MonitoringNotifier: Send + Sync {
    async fn notify_deploy(&self, event: &DeployEvent) -> DeployResult<()>;

    fn notifier_name(&self) -> &'static str;
}

/// Builds collaborators from their configuration sections.
pub trait ClientFactory {
    fn cloud_client(&self, config: &AwsConfig) -> DeployResult<Arc<dyn CloudEnvironmentClient>>;

    fn notifier(&self, config: &NewrelicConfig) -> DeployResult<Arc<dyn MonitoringNotifier>>;
}
