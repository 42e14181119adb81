//! Ordered agent registration.
//!
//! An [`AgentRegistry`] is an explicit, ordered list of registration
//! functions. [`AgentRegistry::register_all`] calls them in declaration order
//! against one manager and stops at the first failure. Agents added before
//! the failure are left attached; nothing is rolled back.

use super::manager::AddonManager;
use super::types::RunContext;
use crate::error::{OrchestratorError, RegistrationFailure};

/// Attaches one agent to the manager. Must return promptly.
pub type RegisterFn =
    dyn Fn(&mut dyn AddonManager, &RunContext) -> Result<(), RegistrationFailure> + Send + Sync;

/// A named registration function.
pub struct AgentRegistration {
    name: String,
    register: Box<RegisterFn>,
}

impl AgentRegistration {
    pub fn new<F>(name: impl Into<String>, register: F) -> Self
    where
        F: Fn(&mut dyn AddonManager, &RunContext) -> Result<(), RegistrationFailure>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            register: Box::new(register),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Default)]
pub struct AgentRegistry {
    entries: Vec<AgentRegistration>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration; builder form of [`AgentRegistry::push`].
    pub fn with(mut self, registration: AgentRegistration) -> Self {
        self.push(registration);
        self
    }

    pub fn push(&mut self, registration: AgentRegistration) {
        self.entries.push(registration);
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke every registration in order, stopping at the first failure.
    pub fn register_all(
        &self,
        mgr: &mut dyn AddonManager,
        ctx: &RunContext,
    ) -> Result<(), OrchestratorError> {
        for (index, entry) in self.entries.iter().enumerate() {
            (entry.register)(&mut *mgr, ctx).map_err(|source| OrchestratorError::AgentRegistration {
                agent: entry.name.clone(),
                index,
                source,
            })?;
            tracing::info!(agent = %entry.name, index, "Agent registered");
        }
        Ok(())
    }
}
