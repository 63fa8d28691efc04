//! Configuration file and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobboard_core::{PollSettings, DEFAULT_PAGE_SIZE};
use jobboard_engine::SearchSettings;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::cli::Cli;

pub const DEFAULT_LOG_FILE: &str = "./jobboard.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// On-disk configuration (RON). Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub min_refresh_interval_ms: Option<u64>,
    pub page_size: Option<u32>,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub max_body_bytes: Option<u64>,
    pub auth_token: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Validated settings ready for the engine and the coordinator.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub poll: PollSettings,
    pub search: SearchSettings,
    pub page_size: u32,
    pub log_file: PathBuf,
}

impl BoardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)
            .map_err(|err| err.to_string())
    }

    /// Command-line flags win over file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(interval) = cli.interval_ms {
            self.poll_interval_ms = Some(interval);
        }
        if let Some(min_interval) = cli.min_interval_ms {
            self.min_refresh_interval_ms = Some(min_interval);
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = Some(page_size);
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = Some(log_file.clone());
        }
        self
    }

    pub fn resolve(self) -> Result<AppSettings, ConfigError> {
        let defaults = SearchSettings::default();
        let poll_defaults = PollSettings::default();

        let poll = PollSettings {
            interval: self
                .poll_interval_ms
                .map_or(poll_defaults.interval, Duration::from_millis),
            min_interval: self
                .min_refresh_interval_ms
                .map_or(poll_defaults.min_interval, Duration::from_millis),
        };
        if poll.interval.is_zero() {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }
        if poll.min_interval > poll.interval {
            return Err(ConfigError::Invalid(
                "min_refresh_interval_ms must not exceed poll_interval_ms".into(),
            ));
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".into()));
        }

        let base_url = self.base_url.unwrap_or(defaults.base_url);
        validate_base_url(&base_url)?;

        let search = SearchSettings {
            base_url,
            connect_timeout: self
                .connect_timeout_ms
                .map_or(defaults.connect_timeout, Duration::from_millis),
            request_timeout: self
                .request_timeout_ms
                .map_or(defaults.request_timeout, Duration::from_millis),
            max_bytes: self.max_body_bytes.unwrap_or(defaults.max_bytes),
            auth_token: self.auth_token.filter(|token| !token.trim().is_empty()),
        };

        Ok(AppSettings {
            poll,
            search,
            page_size,
            log_file: self
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|err| ConfigError::Invalid(format!("base_url {base_url:?}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Invalid(format!(
            "base_url must be an http(s) url, got {base_url:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::{BoardConfig, ConfigError};
    use crate::cli::Cli;

    #[test]
    fn defaults_resolve() {
        let settings = BoardConfig::default().resolve().unwrap();
        assert_eq!(settings.poll.interval, Duration::from_secs(30));
        assert_eq!(settings.poll.min_interval, Duration::from_secs(5));
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.search.base_url, "http://localhost:8080");
        assert_eq!(settings.search.auth_token, None);
    }

    #[test]
    fn ron_file_is_parsed_with_implicit_some() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jobboard.ron");
        fs::write(
            &path,
            r#"(
                base_url: "https://jobs.example.com",
                poll_interval_ms: 10000,
                page_size: 25,
                auth_token: "abc",
            )"#,
        )
        .unwrap();

        let config = BoardConfig::load(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://jobs.example.com"));
        assert_eq!(config.poll_interval_ms, Some(10_000));
        assert_eq!(config.min_refresh_interval_ms, None);

        let settings = config.resolve().unwrap();
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.search.auth_token.as_deref(), Some("abc"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let err = BoardConfig::load(&temp.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ron");
        fs::write(&path, "(page_size: \"many\")").unwrap();
        let err = BoardConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let config = BoardConfig {
            base_url: Some("http://file.example.com".to_string()),
            page_size: Some(50),
            ..BoardConfig::default()
        };
        let cli = Cli::parse_from([
            "jobboard",
            "--base-url",
            "http://cli.example.com",
            "--interval-ms",
            "60000",
        ]);

        let settings = config.with_overrides(&cli).resolve().unwrap();
        assert_eq!(settings.search.base_url, "http://cli.example.com");
        assert_eq!(settings.poll.interval, Duration::from_secs(60));
        assert_eq!(settings.page_size, 50);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let zero_page = BoardConfig {
            page_size: Some(0),
            ..BoardConfig::default()
        };
        assert!(matches!(zero_page.resolve(), Err(ConfigError::Invalid(_))));

        let inverted = BoardConfig {
            poll_interval_ms: Some(1_000),
            min_refresh_interval_ms: Some(2_000),
            ..BoardConfig::default()
        };
        assert!(matches!(inverted.resolve(), Err(ConfigError::Invalid(_))));

        let bad_url = BoardConfig {
            base_url: Some("localhost:8080".to_string()),
            ..BoardConfig::default()
        };
        assert!(matches!(bad_url.resolve(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unparseable_base_urls_are_rejected() {
        for base_url in ["http://bad host:notaport", "http://", "ftp://jobs.example.com", ""] {
            let config = BoardConfig {
                base_url: Some(base_url.to_string()),
                ..BoardConfig::default()
            };
            assert!(
                matches!(config.resolve(), Err(ConfigError::Invalid(_))),
                "{base_url:?} should be rejected"
            );
        }

        let with_path = BoardConfig {
            base_url: Some("https://jobs.example.com/backend/".to_string()),
            ..BoardConfig::default()
        };
        assert!(with_path.resolve().is_ok());
    }
}
