//! Manager lifecycle: resolve config, build the manager, register agents,
//! start, then wait for cancellation.
//!
//! Every step up to `Running` is sequential and fail-fast. The only
//! suspension point is the final wait on the run's [`CancellationToken`].
//! Errors are returned to the caller, which owns process termination.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::manager::ManagerFactory;
use super::registry::AgentRegistry;
use super::resolver::{ConfigLoader, resolve_config};
use super::types::{LifecycleState, RunContext};
use crate::agent::events::EventRecorder;
use crate::config::RunOptions;
use crate::error::{ManagerError, OrchestratorError};

pub struct ManagerLifecycle {
    registry: AgentRegistry,
    loader: Arc<dyn ConfigLoader>,
    factory: Arc<dyn ManagerFactory>,
    recorder: Arc<dyn EventRecorder>,
    state: LifecycleState,
}

impl ManagerLifecycle {
    pub fn new(
        registry: AgentRegistry,
        loader: Arc<dyn ConfigLoader>,
        factory: Arc<dyn ManagerFactory>,
        recorder: Arc<dyn EventRecorder>,
    ) -> Self {
        Self {
            registry,
            loader,
            factory,
            recorder,
            state: LifecycleState::Unstarted,
        }
    }

    /// Current state. After a failed run this is the state the run failed in.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Drive one run to completion. Returns `Ok(())` only after `cancel`
    /// has been observed while running.
    ///
    /// A lifecycle runs once; calling this again after it has left
    /// `Unstarted` fails with [`ManagerError::AlreadyStarted`].
    pub async fn run(
        &mut self,
        options: &RunOptions,
        cancel: CancellationToken,
    ) -> Result<(), OrchestratorError> {
        let result = if self.state == LifecycleState::Unstarted {
            self.drive(options, cancel).await
        } else {
            Err(OrchestratorError::ManagerStart(ManagerError::AlreadyStarted))
        };
        if let Err(e) = &result {
            tracing::error!(
                phase = e.phase(),
                agent = e.agent(),
                state = ?self.state,
                "{}",
                e
            );
        }
        result
    }

    async fn drive(
        &mut self,
        options: &RunOptions,
        cancel: CancellationToken,
    ) -> Result<(), OrchestratorError> {
        self.advance(LifecycleState::Configuring);
        let config = Arc::new(resolve_config(options, self.loader.as_ref()).await?);
        tracing::info!(
            source = %config.source(),
            endpoint = %config.endpoint(),
            "Cluster configuration resolved"
        );

        let mut manager = self
            .factory
            .build(&config)
            .map_err(OrchestratorError::ManagerConstruction)?;

        self.advance(LifecycleState::Registering);
        let ctx = RunContext {
            cancel: cancel.clone(),
            config,
            recorder: Arc::clone(&self.recorder),
        };
        self.registry.register_all(manager.as_mut(), &ctx)?;

        manager
            .start(cancel.clone())
            .await
            .map_err(OrchestratorError::ManagerStart)?;
        self.advance(LifecycleState::Running);
        self.recorder.normal(
            "ManagerStarted",
            &format!("addon manager running {} agents", self.registry.len()),
        );

        cancel.cancelled().await;
        tracing::info!("Cancellation observed, stopping");
        self.advance(LifecycleState::Stopped);
        Ok(())
    }

    fn advance(&mut self, next: LifecycleState) {
        debug_assert_eq!(self.state.next(), Some(next), "lifecycle skipped a state");
        tracing::debug!(from = ?self.state, to = ?next, "Lifecycle transition");
        self.state = next;
    }
}
