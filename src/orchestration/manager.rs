//! The addon manager: owns the registered agents and runs them once started.
//!
//! [`AddonManager`] is the seam the lifecycle and the agent registration
//! functions talk to. [`KubeAddonManager`] is the production implementation,
//! bound to a `kube::Client` built from the resolved configuration.
//!
//! **Start model:** `start` launches one tokio task per agent, each with a
//! child of the run's [`CancellationToken`], and returns as soon as all tasks
//! are spawned. Agents wind down on their own when the token is cancelled;
//! an agent that exits with an error is logged and not restarted.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::types::ResolvedConfig;
use crate::agent::{AddonAgent, AgentRuntime};
use crate::error::ManagerError;

#[async_trait]
pub trait AddonManager: Send {
    /// Attach an agent. Names must be unique within one manager.
    fn add_agent(&mut self, agent: Arc<dyn AddonAgent>) -> Result<(), ManagerError>;

    /// Begin running every attached agent. Returns once they are launched.
    async fn start(&mut self, cancel: CancellationToken) -> Result<(), ManagerError>;
}

/// Builds the manager for a run from the resolved configuration.
pub trait ManagerFactory: Send + Sync {
    fn build(&self, config: &ResolvedConfig) -> Result<Box<dyn AddonManager>, ManagerError>;
}

/// Ordered set of agents plus the tasks running them.
#[derive(Default)]
pub struct AgentSet {
    agents: Vec<Arc<dyn AddonAgent>>,
    handles: Vec<JoinHandle<()>>,
    started: bool,
}

impl AgentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, agent: Arc<dyn AddonAgent>) -> Result<(), ManagerError> {
        if self.agents.iter().any(|a| a.name() == agent.name()) {
            return Err(ManagerError::DuplicateAgent(agent.name().to_string()));
        }
        tracing::debug!(agent = agent.name(), "Agent added to manager");
        self.agents.push(agent);
        Ok(())
    }

    /// Agent names in the order they were added.
    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Spawn one task per agent. Each agent gets a child token of `cancel`.
    pub fn spawn_all(
        &mut self,
        cancel: &CancellationToken,
        client: Option<kube::Client>,
    ) -> Result<(), ManagerError> {
        if self.started {
            return Err(ManagerError::AlreadyStarted);
        }
        if self.agents.is_empty() {
            return Err(ManagerError::NoAgents);
        }

        for agent in &self.agents {
            let agent = Arc::clone(agent);
            let runtime = AgentRuntime {
                cancel: cancel.child_token(),
                client: client.clone(),
            };
            self.handles.push(tokio::spawn(async move {
                match agent.run(runtime).await {
                    Ok(()) => tracing::debug!(agent = agent.name(), "Agent stopped"),
                    Err(e) => {
                        tracing::error!(agent = agent.name(), "Agent exited with error: {:#}", e)
                    }
                }
            }));
        }
        self.started = true;
        Ok(())
    }

    /// Number of agent tasks that have not finished yet.
    #[cfg(test)]
    pub(crate) fn running(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

/// Production manager bound to one cluster.
pub struct KubeAddonManager {
    client: kube::Client,
    agents: AgentSet,
}

impl KubeAddonManager {
    pub fn new(client: kube::Client) -> Self {
        Self {
            client,
            agents: AgentSet::new(),
        }
    }
}

#[async_trait]
impl AddonManager for KubeAddonManager {
    fn add_agent(&mut self, agent: Arc<dyn AddonAgent>) -> Result<(), ManagerError> {
        self.agents.add(agent)
    }

    async fn start(&mut self, cancel: CancellationToken) -> Result<(), ManagerError> {
        self.agents.spawn_all(&cancel, Some(self.client.clone()))?;
        tracing::info!(agents = ?self.agents.names(), "Addon manager started");
        Ok(())
    }
}

/// Builds a [`KubeAddonManager`] by constructing a client for the config.
#[derive(Clone, Copy, Debug, Default)]
pub struct KubeManagerFactory;

impl ManagerFactory for KubeManagerFactory {
    fn build(&self, config: &ResolvedConfig) -> Result<Box<dyn AddonManager>, ManagerError> {
        let url = &config.kube_config().cluster_url;
        if !matches!(url.scheme_str(), Some("https") | Some("http")) {
            return Err(ManagerError::InvalidConfig(format!(
                "API server `{url}` must use http or https"
            )));
        }
        let client = kube::Client::try_from(config.kube_config().clone())?;
        Ok(Box::new(KubeAddonManager::new(client)))
    }
}
