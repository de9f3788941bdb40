//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the [`CombatConfig`] defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing CombatConfig
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.double_threshold < 0 {
            anyhow::bail!("double_threshold must be non-negative, got {}", config.double_threshold);
        }
        if config.crit_multiplier < 1 {
            anyhow::bail!("crit_multiplier must be at least 1, got {}", config.crit_multiplier);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("double_threshold = 4\n").expect("valid config");
        assert_eq!(config.double_threshold, 4);
        assert_eq!(config.crit_multiplier, CombatConfig::DEFAULT_CRIT_MULTIPLIER);
    }

    #[test]
    fn triangle_table_from_toml() {
        let text = r#"
            [triangle.advantage]
            hit = 20
            damage = 2
        "#;
        let config = ConfigLoader::parse(text).expect("valid config");
        assert_eq!(config.triangle.advantage.hit, 20);
        assert_eq!(config.triangle.disadvantage.hit, -10);
    }

    #[test]
    fn rejects_zero_crit_multiplier() {
        assert!(ConfigLoader::parse("crit_multiplier = 0\n").is_err());
    }
}
