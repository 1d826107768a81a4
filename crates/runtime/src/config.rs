//! Simulation configuration and its environment loader.
use std::env;
use std::path::PathBuf;

use helper_content::ConfigLoader;
use helper_core::{HelperConfig, NetMode};

use crate::error::Result;

/// Configuration shared by the simulation driver and its collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Which participant this simulation plays.
    pub net_mode: NetMode,
    pub world_seed: u64,
    pub helper: HelperConfig,
    /// TOML file overriding [`HelperConfig`] defaults.
    pub helper_config_path: Option<PathBuf>,
    /// Directory holding `tracking.ron` and `maps/`.
    pub data_dir: Option<PathBuf>,
    /// Waiting helpers refuse the idle despawn at night.
    pub is_day: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            net_mode: NetMode::SinglePlayer,
            world_seed: 0,
            helper: HelperConfig::default(),
            helper_config_path: None,
            data_dir: None,
            is_day: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HELPER_NET_MODE` - `single_player`, `server` or `client` (default: single_player)
    /// - `HELPER_WORLD_SEED` - Seed mixed into every roll (default: 0)
    /// - `HELPER_CONFIG` - Path to a helper TOML file (default: none)
    /// - `HELPER_DATA_DIR` - Content directory (default: none)
    /// - `HELPER_DAYTIME` - Whether it is day in the world (default: true)
    ///
    /// Unparsable values are ignored. The TOML file is not read here; see
    /// [`RuntimeConfig::load_helper_config`].
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(net_mode) = read_env::<NetMode>("HELPER_NET_MODE") {
            config.net_mode = net_mode;
        }

        if let Some(seed) = read_env::<u64>("HELPER_WORLD_SEED") {
            config.world_seed = seed;
        }

        config.helper_config_path = env::var("HELPER_CONFIG").ok().map(PathBuf::from);
        config.data_dir = env::var("HELPER_DATA_DIR").ok().map(PathBuf::from);

        if let Some(is_day) = read_env::<bool>("HELPER_DAYTIME") {
            config.is_day = is_day;
        }

        config
    }

    /// Replaces [`RuntimeConfig::helper`] with the contents of
    /// `helper_config_path`, if one is set.
    pub fn load_helper_config(mut self) -> Result<Self> {
        if let Some(path) = &self.helper_config_path {
            self.helper = ConfigLoader::load(path)?;
        }
        Ok(self)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use helper_core::EntityKind;

    use super::*;

    #[test]
    fn helper_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "helper_kind = 901").unwrap();

        let config = RuntimeConfig {
            helper_config_path: Some(file.path().to_path_buf()),
            ..RuntimeConfig::default()
        }
        .load_helper_config()
        .unwrap();

        assert_eq!(config.helper.helper_kind, EntityKind(901));
    }

    #[test]
    fn missing_helper_config_is_an_error() {
        let config = RuntimeConfig {
            helper_config_path: Some(PathBuf::from("/nonexistent/helper.toml")),
            ..RuntimeConfig::default()
        };
        assert!(config.load_helper_config().is_err());
    }
}
