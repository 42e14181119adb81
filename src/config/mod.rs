pub mod merge;
pub mod schema;

pub use schema::*;

use crate::cli::{Cli, Commands};
use crate::error::SettingsError;
use std::path::{Path, PathBuf};

/// Build run options by merging CLI flags, settings files, and defaults.
/// Precedence: CLI > explicit `--config` file > global settings > defaults.
///
/// A missing global file is handled gracefully. An explicit `--config` file
/// must exist and parse.
pub fn load_run_options(cli: &Cli) -> Result<RunOptions, SettingsError> {
    let Commands::Controller { config, .. } = &cli.command;
    resolve_layers(cli_to_partial(cli), config.as_deref(), global_settings_path())
}

/// Merge the layers given an optional explicit file and global file location.
pub fn resolve_layers(
    cli: PartialSettings,
    explicit: Option<&Path>,
    global: Option<PathBuf>,
) -> Result<RunOptions, SettingsError> {
    let explicit = match explicit {
        Some(path) => {
            let settings = read_settings_file(path)?;
            tracing::info!("Loaded settings from {}", path.display());
            settings.to_partial()
        }
        None => PartialSettings::default(),
    };

    let global = match global {
        Some(p) => load_optional_settings(&p),
        None => {
            tracing::debug!("Could not determine global settings directory");
            PartialSettings::default()
        }
    };

    Ok(cli.with_fallback(explicit).with_fallback(global).finalize())
}

/// Load the global settings file, returning empty settings when it is absent
/// or broken.
fn load_optional_settings(path: &Path) -> PartialSettings {
    match read_settings_file(path) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {}", path.display());
            settings.to_partial()
        }
        Err(SettingsError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            PartialSettings::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring global settings: {}", e);
            PartialSettings::default()
        }
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<SettingsFile>(&contents).map_err(|e| SettingsError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve the platform-specific global settings path.
/// Linux: ~/.config/governance-addon/addon.toml
fn global_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "governance-addon")
        .map(|dirs| dirs.config_dir().join("addon.toml"))
}

/// Convert CLI arguments to a PartialSettings for merging.
///
/// An absent `--alternate-configuration-enabled` defers to the settings
/// files; `=false` overrides them.
fn cli_to_partial(cli: &Cli) -> PartialSettings {
    let Commands::Controller {
        hub_configuration_path,
        alternate_configuration_enabled,
        kubeconfig,
        ..
    } = &cli.command;
    PartialSettings {
        hub_config_path: hub_configuration_path.clone(),
        use_hub_config: *alternate_configuration_enabled,
        ambient_kubeconfig: kubeconfig.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn explicit_file_fills_unset_cli_values() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = write(
            tmp.path(),
            "addon.toml",
            "[hub]\nkubeconfig = \"/etc/hub.kubeconfig\"\ncontrolplane = true\n",
        );

        let opts = resolve_layers(PartialSettings::default(), Some(&explicit), None).unwrap();
        assert!(opts.use_hub_config);
        assert_eq!(opts.hub_config_path, PathBuf::from("/etc/hub.kubeconfig"));
    }

    #[test]
    fn cli_overrides_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = write(
            tmp.path(),
            "addon.toml",
            "[hub]\nkubeconfig = \"/from/file\"\n[cluster]\nkubeconfig = \"/local\"\n",
        );
        let cli = Cli::try_parse_from([
            "governance-addon",
            "controller",
            "--hub-configuration-path",
            "/from/cli",
        ])
        .unwrap();

        let opts = resolve_layers(cli_to_partial(&cli), Some(&explicit), None).unwrap();
        assert_eq!(opts.hub_config_path, PathBuf::from("/from/cli"));
        assert_eq!(opts.ambient_kubeconfig, Some(PathBuf::from("/local")));
        assert!(!opts.use_hub_config);
    }

    #[test]
    fn cli_false_overrides_file_controlplane() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = write(
            tmp.path(),
            "addon.toml",
            "[hub]\nkubeconfig = \"/etc/hub.kubeconfig\"\ncontrolplane = true\n",
        );
        let cli = Cli::try_parse_from([
            "governance-addon",
            "controller",
            "--controlplane=false",
        ])
        .unwrap();

        let opts = resolve_layers(cli_to_partial(&cli), Some(&explicit), None).unwrap();
        assert!(!opts.use_hub_config);
        assert_eq!(opts.hub_config_path, PathBuf::from("/etc/hub.kubeconfig"));
    }

    #[test]
    fn bare_cli_flag_enables_hub_mode_over_file() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = write(tmp.path(), "addon.toml", "[hub]\ncontrolplane = false\n");
        let cli = Cli::try_parse_from(["governance-addon", "controller", "--controlplane"]).unwrap();

        let opts = resolve_layers(cli_to_partial(&cli), Some(&explicit), None).unwrap();
        assert!(opts.use_hub_config);
    }

    #[test]
    fn explicit_file_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = resolve_layers(PartialSettings::default(), Some(&missing), None).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn explicit_file_parse_error_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = write(tmp.path(), "addon.toml", "[hub]\ncontrolplane = \"yes\"\n");
        let err = resolve_layers(PartialSettings::default(), Some(&bad), None).unwrap_err();
        assert!(matches!(err, SettingsError::ParseError { .. }));
    }

    #[test]
    fn broken_or_missing_global_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = resolve_layers(
            PartialSettings::default(),
            None,
            Some(tmp.path().join("absent.toml")),
        )
        .unwrap();
        assert_eq!(opts, RunOptions::default());

        let broken = write(tmp.path(), "global.toml", "not = [valid");
        let opts = resolve_layers(PartialSettings::default(), None, Some(broken)).unwrap();
        assert_eq!(opts, RunOptions::default());
    }
}
