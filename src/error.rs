use std::path::PathBuf;

/// Errors related to settings-file loading and parsing.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings at {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// A required run option is missing or contradicts another option.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("hub configuration path must not be empty when alternate configuration is enabled")]
    MissingHubConfigPath,
}

/// The resolved cluster configuration could not be loaded or validated.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Failed to infer ambient cluster configuration: {0}")]
    Infer(#[from] kube::config::InferConfigError),

    #[error("Failed to load kubeconfig at {path}: {source}")]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("Cluster configuration from {origin} is unusable: {message}")]
    Invalid { origin: String, message: String },
}

/// Failures raised by the addon manager itself.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("Failed to build Kubernetes client: {0}")]
    Client(#[from] kube::Error),

    #[error("An agent named `{0}` is already added to the manager")]
    DuplicateAgent(String),

    #[error("No agents were added to the manager")]
    NoAgents,

    #[error("Manager has already been started")]
    AlreadyStarted,

    #[error("Invalid cluster configuration: {0}")]
    InvalidConfig(String),
}

/// Cause returned by an agent registration function.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationFailure {
    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error("Invalid agent setup: {0}")]
    InvalidSetup(String),
}

/// Terminal errors of a controller run. Every variant ends the run; none is
/// retried here.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("unable to load cluster configuration: {0}")]
    ConfigLoad(#[from] ConfigLoadError),

    #[error("unable to create addon manager: {0}")]
    ManagerConstruction(#[source] ManagerError),

    #[error("unable to add agent `{agent}` (position {index}): {source}")]
    AgentRegistration {
        agent: String,
        index: usize,
        #[source]
        source: RegistrationFailure,
    },

    #[error("problem starting manager: {0}")]
    ManagerStart(#[source] ManagerError),
}

impl OrchestratorError {
    /// Name of the lifecycle phase the run failed in, for log context.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Configuration(_) | Self::ConfigLoad(_) => "configuring",
            Self::ManagerConstruction(_) => "constructing",
            Self::AgentRegistration { .. } => "registering",
            Self::ManagerStart(_) => "starting",
        }
    }

    /// The failing agent's name, when the error belongs to one agent.
    pub fn agent(&self) -> Option<&str> {
        match self {
            Self::AgentRegistration { agent, .. } => Some(agent),
            _ => None,
        }
    }
}
