use reqwest::Url;

use super::{types::ClientConfig, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Base URL parses and uses http or https
/// - Language is not empty
/// - No camera keyword is blank (a blank keyword matches every torrent)
pub fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::ValidationError(format!("base_url '{}' is invalid: {}", config.base_url, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.language.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "language cannot be empty".to_string(),
        ));
    }

    if config.cam_keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "cam_keywords cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}
