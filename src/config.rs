use crate::export::EXPORT_FILENAME;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BuilderConfig {
    pub session: SessionConfig,
    pub export: ExportConfig,
    pub clipboard: ClipboardConfig,
    /// File the config was read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub log_level: String,
    /// Skip the confirmation step before clearing all tools.
    pub assume_yes: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Program and arguments that receive the text on stdin. Autodetected when unset.
    pub command: Option<Vec<String>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            assume_yes: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: ".".into(),
            filename: EXPORT_FILENAME.into(),
        }
    }
}

/// Returns `<config dir>/ai-tool-builder/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ai-tool-builder").join("config.toml"))
}

impl BuilderConfig {
    /// Load from `path`, or the default location, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(default_config_path);
        let mut config = match path {
            Some(path) if path.exists() => Self::read(&path)?,
            _ => BuilderConfig::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents).context("failed to parse config TOML")?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// AI_TOOL_BUILDER_LOG_LEVEL and AI_TOOL_BUILDER_EXPORT_DIR.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AI_TOOL_BUILDER_LOG_LEVEL") {
            self.session.log_level = val;
        }
        if let Ok(val) = std::env::var("AI_TOOL_BUILDER_EXPORT_DIR") {
            self.export.directory = val;
        }
    }

    pub fn export_directory(&self) -> PathBuf {
        expand_tilde(&self.export.directory)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        let config = BuilderConfig::default();
        assert_eq!(config.session.log_level, "info");
        assert!(!config.session.assume_yes);
        assert_eq!(config.export.filename, "ai-tools.json");
        assert_eq!(config.export.directory, ".");
        assert!(config.clipboard.command.is_none());
        assert!(config.source.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[session]
assume_yes = true

[export]
directory = "/tmp/exports"

[clipboard]
command = ["wl-copy", "--trim-newline"]
"#;
        let config: BuilderConfig = toml::from_str(toml_str).expect("parse");
        assert!(config.session.assume_yes);
        assert_eq!(config.export.directory, "/tmp/exports");
        assert_eq!(
            config.clipboard.command,
            Some(vec!["wl-copy".to_string(), "--trim-newline".to_string()])
        );
        // unset fields keep defaults
        assert_eq!(config.session.log_level, "info");
        assert_eq!(config.export.filename, "ai-tools.json");
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\nfilename = \"tools.json\"\n").expect("write");
        let config = BuilderConfig::load(Some(&path)).expect("load");
        assert_eq!(config.export.filename, "tools.json");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = BuilderConfig::load(Some(&dir.path().join("absent.toml"))).expect("load");
        assert!(config.source.is_none());
        assert_eq!(config.export.filename, "ai-tools.json");
    }

    #[test]
    fn load_rejects_bad_toml() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export\n").expect("write");
        assert!(BuilderConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/out"), home.join("out"));
        }
        assert_eq!(expand_tilde("/abs/out"), PathBuf::from("/abs/out"));
    }
}
