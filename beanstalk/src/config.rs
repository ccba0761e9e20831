use crate::client::{DeployError, DeployResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    pub application_name: String,
    pub bucket: String,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            application_name: String::new(),
            bucket: String::new(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl AwsConfig {
    pub fn new(application_name: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.region.is_empty() {
            return Err("AWS region cannot be empty".to_string());
        }

        if self.application_name.is_empty() {
            return Err("Application name cannot be empty".to_string());
        }

        if self.bucket.is_empty() {
            return Err("Artifact bucket cannot be empty".to_string());
        }

        // Static credentials come as a pair; otherwise the SDK's default chain applies.
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "access_key_id and secret_access_key must be set together".to_string(),
            );
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewrelicConfig {
    pub api_key: String,
    pub application_id: String,
    #[serde(default)]
    pub user: Option<String>,
}

impl NewrelicConfig {
    pub fn new(api_key: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            application_id: application_id.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("New Relic API key cannot be empty".to_string());
        }

        if self.application_id.is_empty() {
            return Err("New Relic application id cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Everything needed to build a [`crate::Deployer`]. The `newrelic` section
/// is optional; without it deploys are not reported to monitoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployerConfig {
    pub aws: AwsConfig,
    #[serde(default)]
    pub newrelic: Option<NewrelicConfig>,
}

impl DeployerConfig {
    pub fn new(aws: AwsConfig) -> Self {
        Self {
            aws,
            newrelic: None,
        }
    }

    pub fn with_newrelic(mut self, newrelic: NewrelicConfig) -> Self {
        self.newrelic = Some(newrelic);
        self
    }

    pub fn from_toml_str(contents: &str) -> DeployResult<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> DeployResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.aws.validate()?;

        if let Some(newrelic) = &self.newrelic {
            newrelic.validate()?;
        }

        Ok(())
    }

    pub(crate) fn ensure_valid(&self) -> DeployResult<()> {
        self.validate()
            .map_err(|message| DeployError::InvalidConfig { message })
    }
}
