//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags. Each layer only
//! overrides the fields it sets.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// 16 MiB, the largest upload the analyze form accepts.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Directory served under `/static` (compiled page package, CSS).
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Shape of the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_upload_bytes: Option<usize>,
    pub static_dir: Option<PathBuf>,
}

impl TomlConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}

/// Overrides that come from outside the file (environment, flags).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn apply_toml(mut self, file: TomlConfig) -> Self {
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(max) = file.max_upload_bytes {
            self.max_upload_bytes = max;
        }
        if let Some(dir) = file.static_dir {
            self.static_dir = dir;
        }
        self
    }

    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(dir) = overrides.static_dir {
            self.static_dir = dir;
        }
        self
    }

    /// Resolve the final configuration from an optional file plus overrides.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Some(path) = path {
            config = config.apply_toml(TomlConfig::load(path)?);
        }
        let config = config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_layering_order() {
        let file = TomlConfig::parse("host = \"0.0.0.0\"\nport = 8080\n").unwrap();
        let config = Config::default()
            .apply_toml(file)
            .apply_overrides(Overrides {
                port: Some(9000),
                ..Overrides::default()
            });

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            TomlConfig::parse("prot = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_resolve_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_upload_bytes = 1024\nstatic_dir = \"assets\"").unwrap();

        let config = Config::resolve(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.static_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_zero_upload_limit_is_invalid() {
        let file = TomlConfig::parse("max_upload_bytes = 0").unwrap();
        let config = Config::default().apply_toml(file);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::resolve(
            Some(Path::new("/definitely/not/here.toml")),
            Overrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
