//! Registration for the configuration policy controller addon.

use std::sync::Arc;

use super::addon::PolicyAddonAgent;
use crate::error::RegistrationFailure;
use crate::orchestration::manager::AddonManager;
use crate::orchestration::types::RunContext;

pub const ADDON_NAME: &str = "config-policy-controller";

/// Hub ClusterRole bound for this addon's hub-side access.
pub const HUB_ROLE: &str = "open-cluster-management:config-policy-controller-hub";

pub fn get_and_add_agent(
    mgr: &mut dyn AddonManager,
    ctx: &RunContext,
) -> Result<(), RegistrationFailure> {
    let agent = PolicyAddonAgent::new(ADDON_NAME, HUB_ROLE, ctx)?;
    mgr.add_agent(Arc::new(agent))?;
    Ok(())
}
