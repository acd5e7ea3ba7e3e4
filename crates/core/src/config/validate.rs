use super::{types::Config, ConfigError};

/// Largest page size the console will request.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Validate configuration
/// Currently validates:
/// - api.base_url is an http(s) URL
/// - api.timeout_secs is not 0
/// - catalog.page_size is within 1..=MAX_PAGE_SIZE
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.api.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "api.base_url must start with http:// or https://, got '{}'",
            config.api.base_url
        )));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.catalog.page_size == 0 || config.catalog.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "catalog.page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    Ok(())
}
