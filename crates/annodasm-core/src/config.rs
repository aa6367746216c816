use crate::profile::{Language, Platform};
use crate::resolver::ProfileRegistry;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub language: Language,
    /// Region toggles per platform, by region name.
    #[serde(default)]
    pub regions: BTreeMap<Platform, BTreeMap<String, bool>>,
    /// Comment file stacked on top of the platform tables.
    #[serde(default)]
    pub user_comments: Option<PathBuf>,
}

impl AnnotatorConfig {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "annodasm").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the user configuration, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::path()
            && config_path.exists()
        {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring configuration: {:#}", e),
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read configuration {:?}", path))?;
        serde_json::from_str(&data).with_context(|| format!("Malformed configuration {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::path() {
            self.save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).with_context(|| format!("Cannot write configuration {:?}", path))
    }

    pub fn set_region(&mut self, platform: Platform, name: &str, enabled: bool) {
        self.regions
            .entry(platform)
            .or_default()
            .insert(name.to_string(), enabled);
    }

    /// Pushes region toggles into the matching profiles. Returns how many
    /// toggles were applied; unknown platforms and regions are skipped.
    pub fn apply(&self, registry: &mut ProfileRegistry) -> usize {
        let mut applied = 0;
        for (platform, toggles) in &self.regions {
            let Some(profile) = registry.get_mut(&(*platform).into()) else {
                log::warn!("No profile for platform {}, ignoring its regions", platform);
                continue;
            };
            for (name, enabled) in toggles {
                if profile.set_region(name, *enabled) {
                    log::debug!("{}: region {} {}", platform, name, on_off(*enabled));
                    applied += 1;
                } else {
                    log::warn!("{} has no region named {:?}", platform, name);
                }
            }
        }
        applied
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileId;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("annodasm-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config: AnnotatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnnotatorConfig::default());
        assert_eq!(config.platform, Platform::Commodore64);
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn test_save_and_load() {
        let mut config = AnnotatorConfig {
            platform: Platform::CommodoreVIC20,
            language: Language::Italian,
            ..Default::default()
        };
        config.set_region(Platform::CommodoreVIC20, "VIC", false);
        config.user_comments = Some(PathBuf::from("game.txt"));

        let path = temp_path("config.json");
        config.save_to(&path).unwrap();
        let loaded = AnnotatorConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_reports_errors() {
        let path = temp_path("broken.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        let err = AnnotatorConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Malformed configuration"));
        let _ = std::fs::remove_file(&path);

        assert!(AnnotatorConfig::load_from(&temp_path("missing.json")).is_err());
    }

    #[test]
    fn test_apply_skips_unknown_regions() {
        let mut registry = ProfileRegistry::bundled().unwrap();
        let mut config = AnnotatorConfig::default();
        config.set_region(Platform::Commodore64, "sid", false);
        config.set_region(Platform::Commodore64, "no such region", false);

        assert_eq!(config.apply(&mut registry), 1);
        let id = ProfileId::from(Platform::Commodore64);
        assert!(!registry.get(&id).unwrap().is_visible(0xD418));
        assert!(registry.get(&id).unwrap().is_visible(0xD020));
        assert_eq!(registry.resolve_address(&id, 0xD418, Language::English), None);
    }
}
