//! Configuration loading

use anyhow::{Context, Result};
use fetch_common::ShellRunner;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::registry::ProbeSettings;

/// Top-level configuration (from config.toml)
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub exec: ExecSection,
}

/// Network configuration section
#[derive(Debug, Default, Deserialize)]
pub struct NetworkSection {
    /// Interface used when the hostname resolves to loopback
    pub fallback_interface: Option<String>,
}

/// External command configuration section
#[derive(Debug, Deserialize)]
pub struct ExecSection {
    /// Per-command time limit; unset means commands may run indefinitely
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            shell: default_shell(),
        }
    }
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

/// `~/.config/quickfetch/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quickfetch").join("config.toml"))
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is used if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from: {}", path.display());
                Self::load_from_path(&path)
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.exec.timeout_secs.map(Duration::from_secs)
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            fallback_interface: self.network.fallback_interface.clone(),
            ..ProbeSettings::default()
        }
    }

    pub fn runner(&self) -> ShellRunner {
        ShellRunner::new(self.exec.shell.clone()).with_timeout(self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.network.fallback_interface, None);
        assert_eq!(config.exec.timeout_secs, None);
        assert_eq!(config.exec.shell, "/bin/sh");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
[network]
fallback_interface = "wlp2s0"

[exec]
timeout_secs = 5
shell = "/bin/bash"
"#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.network.fallback_interface.as_deref(), Some("wlp2s0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.runner().shell_path(), "/bin/bash");
        assert_eq!(
            config.probe_settings().fallback_interface.as_deref(),
            Some("wlp2s0")
        );
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let file = write_config("[exec]\ntimeout_secs = 2\n");
        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.exec.shell, "/bin/sh");
        assert_eq!(config.network.fallback_interface, None);
    }

    #[test]
    fn test_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());

        let file = write_config("[exec]\ntimeout_secs = \"soon\"\n");
        assert!(Config::load(Some(file.path())).is_err());
    }
}
