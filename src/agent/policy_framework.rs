//! Registration for the governance policy framework addon.
//!
//! The framework syncs policies between hub and managed clusters, so it is
//! the addon that cares most which configuration the manager was bound to.

use std::sync::Arc;

use super::addon::PolicyAddonAgent;
use crate::error::RegistrationFailure;
use crate::orchestration::manager::AddonManager;
use crate::orchestration::types::{ConfigSource, RunContext};

pub const ADDON_NAME: &str = "governance-policy-framework";

pub const HUB_ROLE: &str = "open-cluster-management:policy-framework-hub";

pub fn get_and_add_agent(
    mgr: &mut dyn AddonManager,
    ctx: &RunContext,
) -> Result<(), RegistrationFailure> {
    let agent = PolicyAddonAgent::new(ADDON_NAME, HUB_ROLE, ctx)?;
    if let ConfigSource::Hub { path } = ctx.config.source() {
        tracing::debug!(agent = ADDON_NAME, hub = %path.display(), "Using hub configuration");
    }
    mgr.add_agent(Arc::new(agent))?;
    Ok(())
}
