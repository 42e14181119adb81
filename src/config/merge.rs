use super::schema::{PartialSettings, RunOptions};

impl PartialSettings {
    /// Merge self with a lower-priority fallback.
    /// Self's non-None values take precedence.
    pub fn with_fallback(self, fallback: PartialSettings) -> PartialSettings {
        PartialSettings {
            hub_config_path: self.hub_config_path.or(fallback.hub_config_path),
            use_hub_config: self.use_hub_config.or(fallback.use_hub_config),
            ambient_kubeconfig: self.ambient_kubeconfig.or(fallback.ambient_kubeconfig),
        }
    }

    /// Convert to RunOptions, filling any remaining gaps with defaults.
    pub fn finalize(self) -> RunOptions {
        RunOptions {
            hub_config_path: self.hub_config_path.unwrap_or_default(),
            use_hub_config: self.use_hub_config.unwrap_or(false),
            ambient_kubeconfig: self.ambient_kubeconfig,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn higher_layer_wins_per_field() {
        let cli = PartialSettings {
            use_hub_config: Some(true),
            ..Default::default()
        };
        let file = PartialSettings {
            hub_config_path: Some(PathBuf::from("/etc/hub.kubeconfig")),
            use_hub_config: Some(false),
            ambient_kubeconfig: None,
        };

        let opts = cli.with_fallback(file).finalize();
        assert!(opts.use_hub_config);
        assert_eq!(opts.hub_config_path, PathBuf::from("/etc/hub.kubeconfig"));
        assert!(opts.ambient_kubeconfig.is_none());
    }

    #[test]
    fn empty_layers_finalize_to_ambient_mode() {
        let opts = PartialSettings::default()
            .with_fallback(PartialSettings::default())
            .finalize();
        assert_eq!(opts, RunOptions::default());
        assert!(opts.hub_config_path.as_os_str().is_empty());
    }
}
