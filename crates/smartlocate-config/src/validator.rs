//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error, if any, into a [`ConfigError`].
    pub fn ensure_valid(self) -> Result<Self, ConfigError> {
        match self.errors.first() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path.clone(),
                message: error.message.clone(),
            }),
            None => Ok(self),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_service(config, &mut result);
        Self::validate_locator(config, &mut result);
        Self::validate_polling(config, &mut result);
        Self::validate_browser(config, &mut result);

        Ok(result)
    }

    fn validate_service(config: &Config, result: &mut ValidationResult) {
        if config.service.api_key.as_deref().is_none_or(str::is_empty) {
            result.add_warning(ValidationWarning::new(
                "service.api_key",
                "API key is not set, may need to be set via DEVTOOLSAI_API_KEY",
            ));
        }

        if !is_http_url(&config.service.base_url) {
            result.add_error(ValidationError::new(
                "service.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if config.service.request_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "service.request_timeout_seconds",
                "request_timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_locator(config: &Config, result: &mut ValidationResult) {
        if config.locator.test_case.trim().is_empty() {
            result.add_error(ValidationError::new(
                "locator.test_case",
                "test_case cannot be empty",
            ));
        }

        for tag in &config.locator.priority_tags {
            let tag = tag.trim();
            if tag.is_empty() {
                result.add_error(ValidationError::new(
                    "locator.priority_tags",
                    "priority tags cannot be empty",
                ));
            } else if tag == "*" {
                result.add_warning(ValidationWarning::new(
                    "locator.priority_tags",
                    "'*' in priority_tags scans the whole document on every lookup",
                ));
            } else if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                result.add_error(ValidationError::new(
                    "locator.priority_tags",
                    format!("'{}' is not a valid tag name", tag),
                ));
            }
        }
    }

    fn validate_polling(config: &Config, result: &mut ValidationResult) {
        if config.polling.interval_ms == 0 {
            result.add_error(ValidationError::new(
                "polling.interval_ms",
                "interval_ms must be greater than 0",
            ));
        } else if config.polling.interval_ms < 250 {
            result.add_warning(ValidationWarning::new(
                "polling.interval_ms",
                "interval_ms below 250 may overload the review service",
            ));
        }

        if config.polling.timeout_seconds == Some(0) {
            result.add_error(ValidationError::new(
                "polling.timeout_seconds",
                "timeout_seconds must be greater than 0 when set",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.browser.endpoint) {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
