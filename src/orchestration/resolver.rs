//! Cluster configuration resolution.
//!
//! [`resolve_config`] decides which configuration the manager binds to. In
//! ambient mode the hub path is never looked at. In control-plane mode the
//! hub path is required and loaded as a kubeconfig file; a missing or broken
//! file is fatal with no fallback. Resolution reads files only and makes no
//! network calls.

use std::path::Path;

use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};

use super::types::{ConfigSource, ResolvedConfig};
use crate::config::RunOptions;
use crate::error::{ConfigLoadError, ConfigurationError, OrchestratorError};

/// Loads raw cluster configurations.
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    /// The process's own configuration. `kubeconfig` overrides inference.
    async fn ambient(&self, kubeconfig: Option<&Path>) -> Result<kube::Config, ConfigLoadError>;

    /// A configuration read from the kubeconfig file at `path`.
    async fn from_file(&self, path: &Path) -> Result<kube::Config, ConfigLoadError>;
}

/// [`ConfigLoader`] backed by kube's kubeconfig and in-cluster loading.
#[derive(Clone, Copy, Debug, Default)]
pub struct KubeConfigLoader;

#[async_trait]
impl ConfigLoader for KubeConfigLoader {
    async fn ambient(&self, kubeconfig: Option<&Path>) -> Result<kube::Config, ConfigLoadError> {
        match kubeconfig {
            Some(path) => self.from_file(path).await,
            None => Ok(kube::Config::infer().await?),
        }
    }

    async fn from_file(&self, path: &Path) -> Result<kube::Config, ConfigLoadError> {
        let kubeconfig =
            Kubeconfig::read_from(path).map_err(|source| ConfigLoadError::Kubeconfig {
                path: path.to_path_buf(),
                source,
            })?;
        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|source| ConfigLoadError::Kubeconfig {
                path: path.to_path_buf(),
                source,
            })?;

        if config.cluster_url.host().is_none() {
            return Err(ConfigLoadError::Invalid {
                origin: path.display().to_string(),
                message: format!("server `{}` has no host", config.cluster_url),
            });
        }
        Ok(config)
    }
}

/// Resolve the configuration the manager will be built from.
pub async fn resolve_config(
    options: &RunOptions,
    loader: &dyn ConfigLoader,
) -> Result<ResolvedConfig, OrchestratorError> {
    if !options.use_hub_config {
        let config = loader.ambient(options.ambient_kubeconfig.as_deref()).await?;
        return Ok(ResolvedConfig::new(ConfigSource::Ambient, config));
    }

    if options.hub_config_path.as_os_str().is_empty() {
        return Err(ConfigurationError::MissingHubConfigPath.into());
    }

    let config = loader.from_file(&options.hub_config_path).await?;
    Ok(ResolvedConfig::new(
        ConfigSource::Hub {
            path: options.hub_config_path.clone(),
        },
        config,
    ))
}
