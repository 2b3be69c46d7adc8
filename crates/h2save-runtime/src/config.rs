use crate::Result;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "H2SAVE_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. H2SAVE_CONFIG environment variable (with tilde expansion)
/// 3. `<config_dir>/h2save/config.toml`
///
/// Returns `None` when none of these is available.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    resolve_config_path_from(
        explicit_path,
        std::env::var_os(CONFIG_ENV_VAR),
        dirs::config_dir(),
    )
}

fn resolve_config_path_from(
    explicit_path: Option<&Path>,
    env_path: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(path));
    }

    if let Some(env_path) = env_path.filter(|p| !p.is_empty()) {
        return Some(expand_tilde(Path::new(&env_path)));
    }

    config_dir.map(|dir| dir.join("h2save").join("config.toml"))
}

/// Expand a leading `~/` to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    path.to_path_buf()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DownloadsConfig {
    /// Directory download artifacts are written into.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SavesConfig {
    /// Overrides save directory detection.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TreeConfig {
    #[serde(default)]
    pub expand_on_open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub downloads: DownloadsConfig,
    #[serde(default)]
    pub saves: SavesConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load the config from the resolved path; a missing file yields defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        Self::load_resolved(resolve_config_path(explicit_path).as_deref())
    }

    fn load_resolved(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                tracing::debug!("no config location, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Download directory: configured value, else the user's download
    /// directory, else the working directory.
    pub fn downloads_dir(&self) -> PathBuf {
        self.downloads
            .dir
            .as_deref()
            .map(expand_tilde)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn saves_dir(&self) -> Option<PathBuf> {
        self.saves.dir.as_deref().map(expand_tilde)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.downloads.dir, None);
        assert!(!config.tree.expand_on_open);
        assert_eq!(config.log.level, None);
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_load_all_sections() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[downloads]
dir = "/tmp/h2save-out"

[saves]
dir = "/games/saves"

[tree]
expand_on_open = true

[log]
level = "debug"
file = "/tmp/h2save.log"
"#,
        )?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.downloads_dir(), PathBuf::from("/tmp/h2save-out"));
        assert_eq!(config.saves_dir(), Some(PathBuf::from("/games/saves")));
        assert!(config.tree.expand_on_open);
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/h2save.log")));

        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[tree]\nexpand_on_open = true\n")?;

        let config = Config::load_from(&config_path)?;
        assert!(config.tree.expand_on_open);
        assert_eq!(config.saves, SavesConfig::default());

        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[tree\nexpand_on_open = ")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        Ok(())
    }

    #[test]
    fn test_resolve_priority() {
        let explicit = resolve_config_path_from(
            Some(Path::new("/explicit.toml")),
            Some(OsString::from("/env.toml")),
            Some(PathBuf::from("/config")),
        )
        .unwrap();
        assert_eq!(explicit, PathBuf::from("/explicit.toml"));

        let env = resolve_config_path_from(
            None,
            Some(OsString::from("/env.toml")),
            Some(PathBuf::from("/config")),
        )
        .unwrap();
        assert_eq!(env, PathBuf::from("/env.toml"));

        let default =
            resolve_config_path_from(None, Some(OsString::new()), Some(PathBuf::from("/config")))
                .unwrap();
        assert_eq!(default, PathBuf::from("/config/h2save/config.toml"));

        assert_eq!(resolve_config_path_from(None, None, None), None);
    }

    #[test]
    fn test_no_config_location_loads_defaults() -> Result<()> {
        let path = resolve_config_path_from(None, Some(OsString::new()), None);
        assert_eq!(Config::load_resolved(path.as_deref())?, Config::default());
        Ok(())
    }
}
