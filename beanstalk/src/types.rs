use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A version the caller wants registered: label, human description and the
/// object name the artifact lives under in the platform's storage bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionDescriptor {
    pub version_label: String,
    pub description: String,
    pub remote_filename: String,
}

impl VersionDescriptor {
    pub fn new(
        version_label: impl Into<String>,
        description: impl Into<String>,
        remote_filename: impl Into<String>,
    ) -> Self {
        Self {
            version_label: version_label.into(),
            description: description.into(),
            remote_filename: remote_filename.into(),
        }
    }
}

/// Options for registering a version from an artifact that is already uploaded.
pub type CreateVersionOptions = VersionDescriptor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceBundle {
    pub bucket: String,
    pub key: String,
}

/// Version record as reported back by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionDetails {
    pub version_label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_bundle: Option<SourceBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl VersionDetails {
    pub fn new(version_label: impl Into<String>) -> Self {
        Self {
            version_label: version_label.into(),
            description: String::new(),
            source_bundle: None,
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_source_bundle(mut self, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        self.source_bundle = Some(SourceBundle {
            bucket: bucket.into(),
            key: key.into(),
        });
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Snapshot of an environment. The platform owns the real state; this is
/// only what it reported at the time of the call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
}

impl EnvironmentInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            status: None,
            health: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_health(mut self, health: impl Into<String>) -> Self {
        self.health = Some(health.into());
        self
    }
}

impl fmt::Display for EnvironmentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (version {}", self.name, self.version)?;
        if let Some(status) = &self.status {
            write!(f, ", status {}", status)?;
        }
        if let Some(health) = &self.health {
            write!(f, ", health {}", health)?;
        }
        write!(f, ")")
    }
}

/// Upload a local archive, register it and roll it out to `environment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAndDeployOptions {
    pub environment: String,
    pub filename: PathBuf,
    pub remote_filename: String,
    pub version_label: String,
    pub description: String,
}

impl CreateAndDeployOptions {
    pub fn new(
        environment: impl Into<String>,
        filename: impl Into<PathBuf>,
        version: VersionDescriptor,
    ) -> Self {
        Self {
            environment: environment.into(),
            filename: filename.into(),
            remote_filename: version.remote_filename,
            version_label: version.version_label,
            description: version.description,
        }
    }

    pub fn descriptor(&self) -> VersionDescriptor {
        VersionDescriptor::new(
            self.version_label.clone(),
            self.description.clone(),
            self.remote_filename.clone(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployVersionOptions {
    pub environment: String,
    pub version: String,
}

impl DeployVersionOptions {
    pub fn new(environment: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoteVersionOptions {
    pub source_environment: String,
    pub target_environment: String,
}

impl PromoteVersionOptions {
    pub fn new(
        source_environment: impl Into<String>,
        target_environment: impl Into<String>,
    ) -> Self {
        Self {
            source_environment: source_environment.into(),
            target_environment: target_environment.into(),
        }
    }
}

/// What the monitoring notifier is told about a finished rollout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployEvent {
    pub environment: String,
    pub version: String,
}

impl DeployEvent {
    pub fn new(environment: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            version: version.into(),
        }
    }
}
