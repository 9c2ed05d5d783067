use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `TICKETDESK_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "TICKETDESK_";

/// Unprefixed listen port, as set by most hosting platforms.
pub const PORT_ENV: &str = "PORT";

/// Unprefixed SQLite URL, e.g. `sqlite:///tickets.db`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

const SQLITE_URL_SCHEME: &str = "sqlite:///";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));
    with_env_overrides(figment)?
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from defaults and environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    with_env_overrides(figment)?
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Layer `PORT`/`DATABASE_URL`, then `TICKETDESK_*` on top.
///
/// Prefixed variables win over the unprefixed ones.
fn with_env_overrides(figment: Figment) -> Result<Figment, ConfigError> {
    let mut figment = figment.merge(
        Env::raw()
            .only(&[PORT_ENV])
            .map(|_| "server.port".into()),
    );

    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        if !url.trim().is_empty() {
            let path = database_path_from_url(url.trim())?;
            figment = figment.merge(Serialized::default("database.path", path));
        }
    }

    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// `sqlite:///tickets.db` is relative, `sqlite:////var/db/t.db` absolute.
fn database_path_from_url(url: &str) -> Result<PathBuf, ConfigError> {
    match url.strip_prefix(SQLITE_URL_SCHEME) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Err(ConfigError::ParseError(format!(
            "{} must look like {}<path>, got {:?}",
            DATABASE_URL_ENV, SQLITE_URL_SCHEME, url
        ))),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
