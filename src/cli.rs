use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "governance-addon",
    version,
    about = "Governance policy addon controller for Open Cluster Management",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the addon controller
    Controller {
        /// Location of the hub cluster's kubeconfig to run against
        #[arg(long, visible_alias = "hubkubeconfig")]
        hub_configuration_path: Option<PathBuf>,

        /// Enable control-plane (hosted) install; requires a hub kubeconfig.
        /// Accepts `--controlplane`, `--controlplane=true` or `--controlplane=false`.
        #[arg(
            long,
            visible_alias = "controlplane",
            num_args = 0..=1,
            default_missing_value = "true",
            require_equals = true
        )]
        alternate_configuration_enabled: Option<bool>,

        /// Kubeconfig for the local cluster (defaults to in-cluster or KUBECONFIG)
        #[arg(long)]
        kubeconfig: Option<PathBuf>,

        /// Path to settings file (overrides default search)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
