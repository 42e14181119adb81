//! Shared agent type for the built-in policy addons.
//!
//! The addons' reconcile logic lives outside this crate; inside the manager
//! each one announces itself, checks that its cluster answers, and then holds
//! its slot until the run is cancelled.

use std::sync::Arc;

use async_trait::async_trait;

use super::events::EventRecorder;
use super::{AddonAgent, AgentRuntime};
use crate::error::RegistrationFailure;
use crate::orchestration::types::{ConfigSource, RunContext};

/// Namespace the addons are installed into on managed clusters.
pub const INSTALL_NAMESPACE: &str = "open-cluster-management-agent-addon";

/// Kubernetes object names are DNS-1123 labels at most 63 bytes long.
const MAX_NAME_LEN: usize = 63;

pub struct PolicyAddonAgent {
    name: &'static str,
    hub_role: &'static str,
    install_namespace: String,
    source: ConfigSource,
    recorder: Arc<dyn EventRecorder>,
}

impl PolicyAddonAgent {
    /// Build an agent from the run context. Fails if `name` is not a valid
    /// addon name.
    pub fn new(
        name: &'static str,
        hub_role: &'static str,
        ctx: &RunContext,
    ) -> Result<Self, RegistrationFailure> {
        validate_addon_name(name)?;
        Ok(Self {
            name,
            hub_role,
            install_namespace: INSTALL_NAMESPACE.to_string(),
            source: ctx.config.source().clone(),
            recorder: Arc::clone(&ctx.recorder),
        })
    }

    pub fn hub_role(&self) -> &str {
        self.hub_role
    }

    pub fn install_namespace(&self) -> &str {
        &self.install_namespace
    }
}

#[async_trait]
impl AddonAgent for PolicyAddonAgent {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, runtime: AgentRuntime) -> anyhow::Result<()> {
        tracing::info!(
            agent = self.name,
            hub_role = self.hub_role,
            namespace = %self.install_namespace,
            source = %self.source,
            "Agent running"
        );
        self.recorder.normal(
            "AddonStarted",
            &format!("{} running against {} configuration", self.name, self.source),
        );

        if let Some(client) = &runtime.client {
            tokio::select! {
                _ = runtime.cancel.cancelled() => {}
                version = client.apiserver_version() => match version {
                    Ok(info) => tracing::info!(
                        agent = self.name,
                        server_version = %info.git_version,
                        "Connected to API server"
                    ),
                    Err(e) => self.recorder.warning(
                        "ApiServerUnreachable",
                        &format!("{}: {}", self.name, e),
                    ),
                },
            }
        }

        runtime.cancel.cancelled().await;
        self.recorder
            .normal("AddonStopped", &format!("{} stopped", self.name));
        Ok(())
    }
}

fn validate_addon_name(name: &str) -> Result<(), RegistrationFailure> {
    let valid_chars = name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if name.is_empty()
        || name.len() > MAX_NAME_LEN
        || !valid_chars
        || name.starts_with('-')
        || name.ends_with('-')
    {
        return Err(RegistrationFailure::InvalidSetup(format!(
            "`{name}` is not a valid addon name"
        )));
    }
    Ok(())
}
