//! Optional TOML configuration.
//!
//! ```toml
//! [logging]
//! level = "info"          # any EnvFilter directive
//! file = "pocket.log"     # appended to; directory must exist
//!
//! [display]
//! color = true            # color error frames when stdout is a terminal
//! trace = false           # print every frame, not just the last
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
    pub trace: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            trace: false,
        }
    }
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config, Config::default());
        assert!(config.display.color);
        assert!(!config.display.trace);
    }

    #[test]
    fn full_file_parses() {
        let config = Config::parse(
            r#"
            [logging]
            level = "debug"
            file = "pocket.log"

            [display]
            color = false
            trace = true
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, Some(PathBuf::from("pocket.log")));
        assert_eq!(
            config.display,
            DisplayConfig {
                color: false,
                trace: true,
            }
        );
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = Config::parse("[display]\ntrace = true\n").unwrap();

        assert!(config.display.color);
        assert!(config.display.trace);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Config::parse("[display]\ncolour = true\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();

        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Config::load_optional(None).unwrap(), Config::default());
    }
}
