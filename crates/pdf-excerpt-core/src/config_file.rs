use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub fetch: Option<FetchConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Include the failure kind and message in pipeline error responses.
    pub expose_pipeline_errors: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Platform config directory path: `<config_dir>/pdf-excerpt/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdf-excerpt").join("config.toml"))
}

/// Load config by cascading CWD `.pdf-excerpt.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdf-excerpt.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let overlay_server = overlay.server.unwrap_or_default();
    let base_fetch = base.fetch.unwrap_or_default();
    let overlay_fetch = overlay.fetch.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            host: overlay_server.host.or(base_server.host),
            port: overlay_server.port.or(base_server.port),
            expose_pipeline_errors: overlay_server
                .expose_pipeline_errors
                .or(base_server.expose_pipeline_errors),
        }),
        fetch: Some(FetchConfig {
            timeout_secs: overlay_fetch.timeout_secs.or(base_fetch.timeout_secs),
            user_agent: overlay_fetch.user_agent.or(base_fetch.user_agent),
        }),
    }
}
