//! Client configuration stored at `<config dir>/careerbot/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const BASE_URL_ENV: &str = "CAREERBOT_BASE_URL";

/// Missing keys fall back to a backend running locally on its default port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Root of the backend, without the `/api` prefix.
    pub base_url: String,

    /// Per-request timeout. A hung backend fails the request instead of freezing the board.
    pub request_timeout_secs: u64,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(anyhow!("base_url must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("base_url must start with http:// or https://, got {url}"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be > 0"));
        }
        if self.log_level.trim().is_empty() {
            return Err(anyhow!("log_level must not be empty"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "careerbot").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load config from a TOML file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Where the config file comes from. Only the per-user default may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFile {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// `<config dir>/careerbot/config.toml`.
    UserDefault(PathBuf),
}

impl ConfigFile {
    pub fn locate(explicit: Option<PathBuf>) -> Option<Self> {
        explicit
            .map(ConfigFile::Explicit)
            .or_else(|| default_path().map(ConfigFile::UserDefault))
    }

    pub fn load(&self) -> Result<Config> {
        match self {
            ConfigFile::Explicit(path) => {
                if !path.exists() {
                    return Err(anyhow!("config file {} does not exist", path.display()));
                }
                load_config(path)
            }
            ConfigFile::UserDefault(path) => load_config(path),
        }
    }
}

/// Applies overrides on top of the file: command line first, then environment.
pub fn resolve(
    file: Option<&ConfigFile>,
    env_base_url: Option<String>,
    cli_base_url: Option<String>,
) -> Result<Config> {
    let mut cfg = match file {
        Some(file) => file.load()?,
        None => Config::default(),
    };
    let override_url = cli_base_url
        .or(env_base_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    if let Some(url) = override_url {
        cfg.base_url = url;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_returns_default() {
        let temp = tempfile::tempdir().unwrap();
        let cfg = load_config(&temp.path().join("missing.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "base_url = \"http://career.internal:8080\"\n").unwrap();

        let cfg = load_config(&path).unwrap();

        assert_eq!(cfg.base_url, "http://career.internal:8080");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 0\n").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "base_url = \"http://from-file:5000\"\n").unwrap();

        let file = ConfigFile::Explicit(path);

        let from_file = resolve(Some(&file), None, None).unwrap();
        assert_eq!(from_file.base_url, "http://from-file:5000");

        let from_env = resolve(Some(&file), Some("http://from-env:5000".to_string()), None).unwrap();
        assert_eq!(from_env.base_url, "http://from-env:5000");

        let from_cli = resolve(
            Some(&file),
            Some("http://from-env:5000".to_string()),
            Some("http://from-cli:5000".to_string()),
        )
        .unwrap();
        assert_eq!(from_cli.base_url, "http://from-cli:5000");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("typo.toml");

        let err = resolve(Some(&ConfigFile::Explicit(missing.clone())), None, None).unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        let cfg = resolve(Some(&ConfigFile::UserDefault(missing)), None, None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let file = ConfigFile::locate(Some(PathBuf::from("/etc/careerbot.toml")));
        assert_eq!(file, Some(ConfigFile::Explicit(PathBuf::from("/etc/careerbot.toml"))));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let cfg = resolve(None, Some("  ".to_string()), None).unwrap();
        assert_eq!(cfg.base_url, Config::default().base_url);
    }

    #[test]
    fn test_override_without_scheme_is_rejected() {
        assert!(resolve(None, None, Some("localhost:5000".to_string())).is_err());
    }
}
