//! Addon agents and their registration functions.
//!
//! An agent is one independently authored controller. It is attached to the
//! manager by a registration function during startup and run by the manager
//! once it starts. [`builtin_registry`] is the fixed, ordered agent set the
//! controller command runs.

pub mod addon;
pub mod config_policy;
pub mod events;
pub mod policy_framework;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::orchestration::registry::{AgentRegistration, AgentRegistry};

/// Handed to an agent when the manager starts it.
#[derive(Clone)]
pub struct AgentRuntime {
    /// Child of the run's token; cancelled when the process stops.
    pub cancel: CancellationToken,
    /// Client for the cluster the manager is bound to, when one exists.
    pub client: Option<kube::Client>,
}

/// A controller owned and run by the addon manager.
#[async_trait]
pub trait AddonAgent: Send + Sync {
    /// Unique addon name, e.g. `config-policy-controller`.
    fn name(&self) -> &str;

    /// Run until `runtime.cancel` fires. Long-running work belongs here,
    /// never in the registration function.
    async fn run(&self, runtime: AgentRuntime) -> anyhow::Result<()>;
}

/// The agents the controller command registers, in registration order.
pub fn builtin_registry() -> AgentRegistry {
    AgentRegistry::new()
        .with(AgentRegistration::new(
            config_policy::ADDON_NAME,
            config_policy::get_and_add_agent,
        ))
        .with(AgentRegistration::new(
            policy_framework::ADDON_NAME,
            policy_framework::get_and_add_agent,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_fixed() {
        assert_eq!(
            builtin_registry().names(),
            vec!["config-policy-controller", "governance-policy-framework"]
        );
    }
}
