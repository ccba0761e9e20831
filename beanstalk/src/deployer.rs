//! Deployment orchestration against an Elastic Beanstalk style platform.
//!
//! Every operation is a fixed sequence of collaborator calls. A step only
//! runs once the previous one succeeded; the first error ends the operation
//! and is handed back exactly as the collaborator produced it. Nothing is
//! rolled back: an environment that was switched to a new version stays on
//! it even if the readiness wait fails afterwards.

use crate::client::{ClientFactory, CloudEnvironmentClient, DeployResult, MonitoringNotifier};
use crate::config::DeployerConfig;
use crate::types::{
    CreateAndDeployOptions, CreateVersionOptions, DeployEvent, DeployVersionOptions,
    EnvironmentInfo, PromoteVersionOptions, VersionDetails,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct Deployer {
    cloud: Arc<dyn CloudEnvironmentClient>,
    notifier: Option<Arc<dyn MonitoringNotifier>>,
}

impl Deployer {
    pub fn new(
        cloud: Arc<dyn CloudEnvironmentClient>,
        notifier: Option<Arc<dyn MonitoringNotifier>>,
    ) -> Self {
        Self { cloud, notifier }
    }

    /// Validate `config` and build the collaborators through `factory`.
    /// The notifier is only built when the config has a New Relic section.
    pub fn from_config(
        config: &DeployerConfig,
        factory: &dyn ClientFactory,
    ) -> DeployResult<Self> {
        config.ensure_valid()?;

        let cloud = factory.cloud_client(&config.aws)?;
        let notifier = match &config.newrelic {
            Some(newrelic) => Some(factory.notifier(newrelic)?),
            None => None,
        };

        debug!(
            "Deployer ready for application {} (monitoring: {})",
            config.aws.application_name,
            notifier.is_some()
        );

        Ok(Self::new(cloud, notifier))
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    pub async fn get_versions(&self, version: &str) -> DeployResult<VersionDetails> {
        info!("Get versions");
        self.cloud.get_application_version(version).await
    }

    /// Register a version whose artifact is already in the bucket.
    pub async fn create_version(
        &self,
        options: &CreateVersionOptions,
    ) -> DeployResult<VersionDetails> {
        info!("Creating version {}", options.version_label);
        self.cloud
            .create_application_version(
                &options.version_label,
                &options.description,
                &options.remote_filename,
            )
            .await
    }

    /// Upload `options.filename`, register it as a version, switch the
    /// environment to it and wait until the environment is ready again.
    pub async fn create_version_and_deploy(
        &self,
        options: &CreateAndDeployOptions,
    ) -> DeployResult<()> {
        info!("Deploy a new version to {}", options.environment);

        self.run_create_and_deploy(options).await.map_err(|e| {
            error!("Cannot deploy new version to {}: {}", options.environment, e);
            e
        })
    }

    async fn run_create_and_deploy(&self, options: &CreateAndDeployOptions) -> DeployResult<()> {
        self.cloud
            .upload_archive(&options.filename, &options.remote_filename)
            .await?;
        info!("Uploaded archive to {}", options.remote_filename);

        let details = self
            .cloud
            .create_application_version(
                &options.version_label,
                &options.description,
                &options.remote_filename,
            )
            .await?;
        info!("Created application version {}", details.version_label);

        self.cloud
            .update_environment_version(&options.environment, &details.version_label)
            .await?;
        info!("Updated environment {}", options.environment);

        self.cloud.wait_environment_ready(&options.environment).await?;
        info!("Environment {} has been successfully updated", options.environment);

        Ok(())
    }

    /// Switch an environment to a version that already exists.
    pub async fn deploy_version(&self, options: &DeployVersionOptions) -> DeployResult<()> {
        info!("Deploy version {} to {}", options.version, options.environment);

        self.run_deploy_version(options).await.map_err(|e| {
            error!("Cannot deploy version {}", e);
            e
        })
    }

    async fn run_deploy_version(&self, options: &DeployVersionOptions) -> DeployResult<()> {
        self.cloud
            .update_environment_version(&options.environment, &options.version)
            .await?;

        self.notify(DeployEvent::new(&options.environment, &options.version))
            .await?;

        self.cloud.wait_environment_ready(&options.environment).await?;
        info!("{} has been updated", options.environment);

        Ok(())
    }

    /// Put the target environment on whatever version the source environment
    /// is running right now.
    pub async fn promote_version(&self, options: &PromoteVersionOptions) -> DeployResult<()> {
        info!(
            "Promote version from {} to {}",
            options.source_environment, options.target_environment
        );

        self.run_promote_version(options).await.map_err(|e| {
            error!("Cannot promote version {}", e);
            e
        })
    }

    async fn run_promote_version(&self, options: &PromoteVersionOptions) -> DeployResult<()> {
        let source = self
            .cloud
            .get_environment_info(&options.source_environment)
            .await?;
        debug!("{} is running version {}", source.name, source.version);

        self.cloud
            .update_environment_version(&options.target_environment, &source.version)
            .await?;

        self.notify(DeployEvent::new(&options.target_environment, &source.version))
            .await?;

        self.cloud
            .wait_environment_ready(&options.target_environment)
            .await?;
        info!(
            "{} has been updated from {}",
            options.target_environment, options.source_environment
        );

        Ok(())
    }

    pub async fn get_environment_info(&self, environment: &str) -> DeployResult<EnvironmentInfo> {
        match self.cloud.get_environment_info(environment).await {
            Ok(info) => {
                info!("Environment: {}", info);
                Ok(info)
            }
            Err(e) => {
                error!("Cannot get environment information {}", e);
                Err(e)
            }
        }
    }

    async fn notify(&self, event: DeployEvent) -> DeployResult<()> {
        let Some(notifier) = &self.notifier else {
            return Ok(());
        };

        notifier.notify_deploy(&event).await?;
        info!(
            "Notified {} of {} on {}",
            notifier.notifier_name(),
            event.version,
            event.environment
        );

        Ok(())
    }
}

impl fmt::Debug for Deployer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deployer")
            .field("has_notifier", &self.has_notifier())
            .finish_non_exhaustive()
    }
}
