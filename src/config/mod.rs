use crate::cli::Args;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use log::{info, warn, error};

pub const DEFAULT_ANSWER_FIELDS: [&str; 3] = ["text", "answer", "json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FLOWISE_API_URL is not set")]
    MissingUrl,
    #[error("FLOWISE_API_URL '{url}' is not a valid URL: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the relay, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// `None` when the upstream is unconfigured; every ask then fails with a configuration answer.
    pub api_url: Option<Url>,
    pub timeout: Duration,
    pub answer_fields: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: Duration::from_secs(120),
            answer_fields: DEFAULT_ANSWER_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl RelayConfig {
    /// Builds the config, logging instead of failing when the URL is missing or malformed.
    pub fn from_args(args: &Args) -> Self {
        let api_url = match parse_api_url(args.flowise_api_url.as_deref()) {
            Ok(url) => {
                info!("Flowise connection configured: {}...", truncate(url.as_str(), 40));
                Some(url)
            }
            Err(e) => {
                error!("{}. Every question will be answered with a configuration error.", e);
                None
            }
        };

        let answer_fields: Vec<String> = args.answer_fields
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        let defaults = Self::default();
        let timeout = if args.flowise_timeout_secs == 0 {
            warn!("FLOWISE_TIMEOUT_SECS must be positive; using {}s", defaults.timeout.as_secs());
            defaults.timeout
        } else {
            Duration::from_secs(args.flowise_timeout_secs)
        };

        Self {
            api_url,
            timeout,
            answer_fields: if answer_fields.is_empty() { defaults.answer_fields } else { answer_fields },
        }
    }

    pub fn with_api_url(mut self, url: Url) -> Self {
        self.api_url = Some(url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn parse_api_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(ConfigError::MissingUrl)?;
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { url: raw.to_string(), source })
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_or_blank_url_is_rejected() {
        assert!(matches!(parse_api_url(None), Err(ConfigError::MissingUrl)));
        assert!(matches!(parse_api_url(Some("   ")), Err(ConfigError::MissingUrl)));
    }

    #[test]
    fn malformed_url_is_rejected() {
        assert!(matches!(parse_api_url(Some("not a url")), Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn from_args_keeps_running_without_url() {
        let args = Args::try_parse_from(["flowise-relay", "--flowise-api-url", ""]).unwrap();
        let config = RelayConfig::from_args(&args);
        assert!(config.api_url.is_none());
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn from_args_parses_url_and_fields() {
        let args = Args::try_parse_from([
            "flowise-relay",
            "--flowise-api-url",
            "http://localhost:3000/api/v1/prediction/abc",
            "--flowise-timeout-secs",
            "30",
            "--answer-fields",
            "answer, ,text",
        ])
        .unwrap();
        let config = RelayConfig::from_args(&args);
        assert_eq!(
            config.api_url.as_ref().map(Url::as_str),
            Some("http://localhost:3000/api/v1/prediction/abc")
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.answer_fields, vec!["answer", "text"]);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let args = Args::try_parse_from(["flowise-relay", "--flowise-timeout-secs", "0"]).unwrap();
        let config = RelayConfig::from_args(&args);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
