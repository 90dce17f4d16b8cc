//! Effective runtime settings: defaults, then config file, then environment.

use std::time::Duration;

use crate::config_file::ConfigFile;
use crate::fetch::FetcherOptions;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub expose_pipeline_errors: bool,
    pub fetch_timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            expose_pipeline_errors: false,
            fetch_timeout: None,
            user_agent: None,
        }
    }
}

impl Settings {
    /// Resolve settings from a config file and an environment lookup.
    ///
    /// Environment variables (`PORT`, `HOST`, `FETCH_TIMEOUT_SECS`,
    /// `EXPOSE_PIPELINE_ERRORS`) override file values.
    pub fn resolve<F>(file: &ConfigFile, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = file.server.clone().unwrap_or_default();
        let fetch = file.fetch.clone().unwrap_or_default();

        let port = match env("PORT") {
            Some(raw) => parse_port(&raw),
            None => server.port.filter(|p| *p > 0).unwrap_or(DEFAULT_PORT),
        };

        let host = env("HOST")
            .filter(|h| !h.trim().is_empty())
            .or(server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let fetch_timeout = env("FETCH_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .or(fetch.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let expose_pipeline_errors = env("EXPOSE_PIPELINE_ERRORS")
            .map(|raw| parse_bool(&raw))
            .or(server.expose_pipeline_errors)
            .unwrap_or(false);

        Self {
            host,
            port,
            expose_pipeline_errors,
            fetch_timeout,
            user_agent: fetch.user_agent,
        }
    }

    /// Resolve against the process environment.
    pub fn from_env(file: &ConfigFile) -> Self {
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    pub fn fetcher_options(&self) -> FetcherOptions {
        FetcherOptions {
            timeout: self.fetch_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Parse a listening port from the leading run of digits (an optional `+` is
/// allowed), so `"8080abc"` and `"8080.5"` both give 8080. Falls back to
/// [`DEFAULT_PORT`] when there are no leading digits or the number is zero or
/// does not fit a `u16`.
pub fn parse_port(raw: &str) -> u16 {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..end].parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            if !trimmed.is_empty() {
                tracing::warn!(
                    value = raw,
                    default = DEFAULT_PORT,
                    "invalid PORT, using default"
                );
            }
            DEFAULT_PORT
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
