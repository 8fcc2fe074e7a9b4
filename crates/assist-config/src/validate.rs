//! Configuration validation logic.

use crate::Config;
use crate::loader::ConfigError;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = config.auth.api_base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::Validation("auth.api_base_url is empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "auth.api_base_url must start with http:// or https://, got '{url}'"
        )));
    }
    if config.auth.default_client.trim().is_empty() {
        return Err(ConfigError::Validation(
            "auth.default_client is empty".into(),
        ));
    }
    if config.auth.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "auth.timeout_secs must be > 0".into(),
        ));
    }
    for (i, user) in config.auth.users.iter().enumerate() {
        if user.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "auth.users[{i}].id is empty"
            )));
        }
        if user.id.contains(assist_core::KEY_SEPARATOR) {
            return Err(ConfigError::Validation(format!(
                "auth.users[{i}].id must not contain '{}'",
                assist_core::KEY_SEPARATOR
            )));
        }
    }
    if let Some(format) = config.logging.format.as_deref() {
        let valid_formats = ["json", "pretty", "compact"];
        if !valid_formats.contains(&format) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of: {:?}",
                valid_formats
            )));
        }
    }
    if let Some(output) = config.logging.output.as_deref() {
        let valid_outputs = ["stdout", "stderr"];
        if !valid_outputs.contains(&output) {
            return Err(ConfigError::Validation(format!(
                "logging.output must be one of: {:?}",
                valid_outputs
            )));
        }
    }
    Ok(())
}
