use serde::Deserialize;
use std::path::PathBuf;

/// The TOML file structure for addon.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub hub: Option<HubSettings>,
    pub cluster: Option<ClusterSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubSettings {
    pub kubeconfig: Option<String>,
    pub controlplane: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterSettings {
    pub kubeconfig: Option<String>,
}

/// Process-wide run options. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Hub kubeconfig path; empty means "not supplied".
    pub hub_config_path: PathBuf,
    /// Detached control-plane mode: bind the manager to the hub configuration.
    pub use_hub_config: bool,
    /// Explicit kubeconfig for the ambient configuration. `None` infers it.
    pub ambient_kubeconfig: Option<PathBuf>,
}

/// Partial settings used during merge. All fields are Option so that
/// missing fields don't override lower-priority values.
#[derive(Debug, Clone, Default)]
pub struct PartialSettings {
    pub hub_config_path: Option<PathBuf>,
    pub use_hub_config: Option<bool>,
    pub ambient_kubeconfig: Option<PathBuf>,
}

impl SettingsFile {
    pub fn to_partial(&self) -> PartialSettings {
        let hub = self.hub.as_ref();
        PartialSettings {
            hub_config_path: hub.and_then(|h| h.kubeconfig.as_ref()).map(PathBuf::from),
            use_hub_config: hub.and_then(|h| h.controlplane),
            ambient_kubeconfig: self
                .cluster
                .as_ref()
                .and_then(|c| c.kubeconfig.as_ref())
                .map(PathBuf::from),
        }
    }
}
