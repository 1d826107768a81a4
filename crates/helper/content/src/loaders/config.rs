//! Helper configuration loader.

use std::path::Path;

use helper_core::HelperConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for helper configuration from TOML files.
///
/// Missing keys fall back to the built-in defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<HelperConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HelperConfig> {
        let config: HelperConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.despawn_ticks == 0 {
            anyhow::bail!("despawn_ticks must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use helper_core::EntityKind;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "helper_kind = 812\ndetection_range = 320.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.helper_kind, EntityKind(812));
        assert_eq!(config.detection_range, 320.0);
        assert_eq!(config.despawn_ticks, HelperConfig::DEFAULT_DESPAWN_TICKS);
    }

    #[test]
    fn rejects_zero_despawn() {
        assert!(ConfigLoader::parse("despawn_ticks = 0").is_err());
    }

    #[test]
    fn reports_missing_file() {
        let err = ConfigLoader::load(Path::new("/nonexistent/helper.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
