//! Addon orchestration core.
//!
//! [`resolver`] picks the cluster configuration, [`registry`] attaches the
//! agents, [`manager`] runs them, and [`lifecycle`] sequences the three.
//! [`run_controller`] wires the production pieces together.

pub mod lifecycle;
pub mod manager;
pub mod registry;
pub mod resolver;
pub mod types;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::agent::builtin_registry;
use crate::agent::events::TracingRecorder;
use crate::config::RunOptions;
use crate::error::OrchestratorError;
use lifecycle::ManagerLifecycle;
use manager::KubeManagerFactory;
use resolver::KubeConfigLoader;

/// Component name used for recorded events.
pub const CONTROLLER_NAME: &str = "governance-policy-addon-controller";

/// Run the built-in agents against a real cluster until `cancel` fires.
pub async fn run_controller(
    options: &RunOptions,
    cancel: CancellationToken,
) -> Result<(), OrchestratorError> {
    let recorder = TracingRecorder::new(CONTROLLER_NAME);
    tracing::info!(run_id = recorder.run_id(), "Starting addon controller");

    let mut lifecycle = ManagerLifecycle::new(
        builtin_registry(),
        Arc::new(KubeConfigLoader),
        Arc::new(KubeManagerFactory),
        Arc::new(recorder),
    );
    lifecycle.run(options, cancel).await
}
