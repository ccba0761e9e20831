pub mod client;
pub mod config;
pub mod deployer;
pub mod types;

pub use client::{
    ClientFactory, CloudEnvironmentClient, DeployError, DeployResult, MonitoringNotifier,
};
pub use config::{AwsConfig, DeployerConfig, NewrelicConfig};
pub use deployer::Deployer;
pub use types::{
    CreateAndDeployOptions, CreateVersionOptions, DeployEvent, DeployVersionOptions,
    EnvironmentInfo, PromoteVersionOptions, SourceBundle, VersionDescriptor, VersionDetails,
};

pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::deployer::*;
    pub use crate::types::*;
}
