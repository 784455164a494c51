use crate::args::Cli;
use crate::presentation::formatters::DEFAULT_SOURCE_SYNTAX;
use crate::types::LogLevel;
use anyhow::{Context, Result};
use rtui_engine::DEFAULT_DELIMITER;
use rtui_store::{ConnectOptions, DEFAULT_PORT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<u32>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DisplayConfig {
    pub delimiter: Option<String>,
    /// Key pattern loaded when the browser starts
    pub pattern: Option<String>,
    /// Language used to highlight `code` snippets
    pub source_syntax: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Option<LogLevel>,
}

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rtui").join("config.toml"))
    }
}

/// Default log location, kept where earlier releases wrote it.
pub fn default_log_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".redis_tui")
        .join("redis_tui.log")
}

/// Effective settings after layering command-line flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub connection: ConnectOptions,
    pub delimiter: String,
    pub pattern: String,
    pub source_syntax: String,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
    pub memory: bool,
    pub samples: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let Config {
            connection,
            display,
            log,
        } = config;

        Self {
            connection: ConnectOptions {
                host: cli
                    .host
                    .clone()
                    .or(connection.host)
                    .unwrap_or_else(|| "localhost".to_string()),
                port: cli.port.or(connection.port).unwrap_or(DEFAULT_PORT),
                db: cli.db.or(connection.db).unwrap_or(0),
                password: cli.password.clone().or(connection.password),
            },
            delimiter: cli
                .delimiter
                .clone()
                .or(display.delimiter)
                .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            pattern: display.pattern.unwrap_or_else(|| "*".to_string()),
            source_syntax: cli
                .source_syntax
                .clone()
                .or(display.source_syntax)
                .unwrap_or_else(|| DEFAULT_SOURCE_SYNTAX.to_string()),
            log_file: cli
                .log_file
                .clone()
                .or(log.file)
                .unwrap_or_else(default_log_file),
            log_level: cli.log_level.or(log.level).unwrap_or(LogLevel::Info),
            memory: cli.memory,
            samples: cli.samples,
        }
    }

    /// Load the config file named on the command line, or the default one.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = match cli.config.clone().or_else(Config::default_path) {
            Some(path) => Config::load_from(&path)?,
            None => Config::default(),
        };
        Ok(Self::resolve(cli, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["rtui"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(&cli(&[]), Config::default());

        assert_eq!(settings.connection, ConnectOptions::default());
        assert_eq!(settings.delimiter, ":");
        assert_eq!(settings.pattern, "*");
        assert_eq!(settings.source_syntax, "rust");
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(settings.log_file.ends_with(".redis_tui/redis_tui.log"));
    }

    #[test]
    fn test_flags_override_file() {
        let config: Config = toml::from_str(
            r#"
            [connection]
            host = "cache.internal"
            port = 6380
            db = 2

            [display]
            delimiter = "/"
            pattern = "user:*"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(&cli(&["--port", "7000", "--delimiter", "."]), config);

        assert_eq!(settings.connection.host, "cache.internal");
        assert_eq!(settings.connection.port, 7000);
        assert_eq!(settings.connection.db, 2);
        assert_eq!(settings.delimiter, ".");
        assert_eq!(settings.pattern, "user:*");
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_source_syntax_layering() {
        let config: Config = toml::from_str("[display]\nsource_syntax = \"python\"\n").unwrap();

        let from_file = Settings::resolve(&cli(&[]), config.clone());
        assert_eq!(from_file.source_syntax, "python");

        let from_flag = Settings::resolve(&cli(&["--source-syntax", "rs"]), config);
        assert_eq!(from_flag.source_syntax, "rs");
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Config::load_from(&temp_dir.path().join("missing.toml"))?;

        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[connection]\nport = \"not a number\"\n")?;

        assert!(Config::load_from(&path).is_err());
        Ok(())
    }
}
