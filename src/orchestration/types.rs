//! Type definitions for the addon orchestration layer.
//!
//! These types form the shared vocabulary between the config resolver, the
//! agent registry, and the manager lifecycle.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::agent::events::EventRecorder;

/// Where the resolved cluster configuration came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// The controller's own cluster: in-cluster credentials, `KUBECONFIG`,
    /// or an explicit `--kubeconfig`.
    Ambient,
    /// A hub kubeconfig supplied for control-plane mode.
    Hub { path: PathBuf },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Ambient => write!(f, "ambient"),
            ConfigSource::Hub { path } => write!(f, "hub ({})", path.display()),
        }
    }
}

/// The cluster configuration the manager is bound to. Derived once per run.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    source: ConfigSource,
    kube: kube::Config,
}

impl ResolvedConfig {
    pub fn new(source: ConfigSource, kube: kube::Config) -> Self {
        Self { source, kube }
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub fn kube_config(&self) -> &kube::Config {
        &self.kube
    }

    /// The API server endpoint, for logs.
    pub fn endpoint(&self) -> String {
        self.kube.cluster_url.to_string()
    }
}

/// Phases of one controller run. Transitions only move forward, one step at
/// a time; `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Unstarted,
    Configuring,
    Registering,
    Running,
    Stopped,
}

impl LifecycleState {
    /// The only state reachable from `self`, if any.
    pub fn next(self) -> Option<LifecycleState> {
        match self {
            LifecycleState::Unstarted => Some(LifecycleState::Configuring),
            LifecycleState::Configuring => Some(LifecycleState::Registering),
            LifecycleState::Registering => Some(LifecycleState::Running),
            LifecycleState::Running => Some(LifecycleState::Stopped),
            LifecycleState::Stopped => None,
        }
    }
}

/// Context handed to every agent registration function.
///
/// Cheap to clone: the config and recorder are shared.
#[derive(Clone)]
pub struct RunContext {
    /// Cancelled when the process is told to stop.
    pub cancel: CancellationToken,
    pub config: Arc<ResolvedConfig>,
    pub recorder: Arc<dyn EventRecorder>,
}
