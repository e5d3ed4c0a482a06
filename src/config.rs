//! Resource root configuration.
//!
//! Provider image roots come from an optional JSON config file
//! (`{"phosphorPath": "...", "ioniconsPath": "..."}`) and, for `build`, an
//! optional resources directory holding `phosphor/` and `ionicons/`. Config
//! keys win over the resources directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PHOSPHOR_SUBDIR: &str = "phosphor";
pub const IONICONS_SUBDIR: &str = "ionicons";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub phosphor_path: Option<String>,
    #[serde(default)]
    pub ionicons_path: Option<String>,
    /// Directory the config was loaded from; relative paths resolve here.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn phosphor_root(&self) -> Option<PathBuf> {
        self.resolve(self.phosphor_path.as_deref())
    }

    pub fn ionicons_root(&self) -> Option<PathBuf> {
        self.resolve(self.ionicons_path.as_deref())
    }

    fn resolve(&self, raw: Option<&str>) -> Option<PathBuf> {
        let raw = raw.filter(|value| !value.is_empty())?;
        let candidate = Path::new(raw);
        if candidate.is_absolute() {
            return Some(candidate.to_path_buf());
        }
        match &self.base_dir {
            Some(base) => Some(base.join(candidate)),
            None => Some(candidate.to_path_buf()),
        }
    }
}

/// Provider-specific directories holding the source SVGs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceRoots {
    pub phosphor: Option<PathBuf>,
    pub ionicons: Option<PathBuf>,
}

impl ResourceRoots {
    pub fn new(phosphor: impl Into<PathBuf>, ionicons: impl Into<PathBuf>) -> Self {
        Self {
            phosphor: Some(phosphor.into()),
            ionicons: Some(ionicons.into()),
        }
    }

    pub fn from_resources_dir(dir: &Path) -> Self {
        Self::new(dir.join(PHOSPHOR_SUBDIR), dir.join(IONICONS_SUBDIR))
    }

    /// Combine a config file with an optional resources directory.
    pub fn resolve(config: Option<&Config>, resources: Option<&Path>) -> Self {
        let defaults = resources.map(Self::from_resources_dir).unwrap_or_default();
        Self {
            phosphor: config
                .and_then(Config::phosphor_root)
                .or(defaults.phosphor),
            ionicons: config
                .and_then(Config::ionicons_root)
                .or(defaults.ionicons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_camel_case_keys_relative_to_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("icons.json");
        fs::write(
            &path,
            r#"{"phosphorPath": "vendor/phosphor", "ioniconsPath": "/opt/ionicons"}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.phosphor_root(),
            Some(temp.path().join("vendor/phosphor"))
        );
        assert_eq!(config.ionicons_root(), Some(PathBuf::from("/opt/ionicons")));
    }

    #[test]
    fn missing_and_empty_keys_are_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("icons.json");
        fs::write(&path, r#"{"phosphorPath": ""}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.phosphor_root(), None);
        assert_eq!(config.ionicons_root(), None);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("icons.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(&path).is_err());
        fs::write(&path, r#"{"phosphorPath": 3}"#).unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn config_keys_override_resources_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("icons.json");
        fs::write(&path, r#"{"ioniconsPath": "/custom/ionicons"}"#).unwrap();
        let config = Config::load(&path).unwrap();

        let roots = ResourceRoots::resolve(Some(&config), Some(Path::new("/res")));
        assert_eq!(roots.phosphor, Some(PathBuf::from("/res/phosphor")));
        assert_eq!(roots.ionicons, Some(PathBuf::from("/custom/ionicons")));

        assert_eq!(ResourceRoots::resolve(None, None), ResourceRoots::default());
    }
}
