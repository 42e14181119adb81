use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use governance_addon::cli::{Cli, Commands};
use governance_addon::config;
use governance_addon::error::OrchestratorError;
use governance_addon::orchestration::run_controller;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Controller { .. } => {
            let options = match config::load_run_options(&cli) {
                Ok(options) => options,
                Err(e) => {
                    tracing::error!(phase = "settings", "{}", e);
                    return ExitCode::FAILURE;
                }
            };
            tracing::info!(
                hub_mode = options.use_hub_config,
                hub_config = %options.hub_config_path.display(),
                "Run options loaded"
            );

            let cancel = CancellationToken::new();
            tokio::spawn({
                let cancel = cancel.clone();
                async move {
                    wait_for_shutdown_signal().await;
                    cancel.cancel();
                }
            });

            // Errors are logged with phase context inside the lifecycle.
            let result = run_controller(&options, cancel).await;
            ExitCode::from(exit_code(&result))
        }
    }
}

/// Process status for a finished run: 0 after a clean stop, 1 for any
/// orchestration failure.
fn exit_code(result: &Result<(), OrchestratorError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Wait for Ctrl+C or SIGTERM. A handler that cannot be installed never fires.
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        _ = terminate => tracing::info!("Received SIGTERM signal"),
    }
}
