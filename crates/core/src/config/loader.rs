use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::ClientConfig, ConfigError};

/// Prefix for environment variable overrides (e.g. `POPCORN_LANGUAGE=fr`).
const ENV_PREFIX: &str = "POPCORN_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX)),
    )
}

/// Load configuration from defaults and environment variables only
pub fn load_config_from_env() -> Result<ClientConfig, ConfigError> {
    extract(
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX)),
    )
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<ClientConfig, ConfigError> {
    toml::from_str::<ClientConfig>(toml_str)
        .map(ClientConfig::normalized)
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<ClientConfig, ConfigError> {
    figment
        .extract::<ClientConfig>()
        .map(ClientConfig::normalized)
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
