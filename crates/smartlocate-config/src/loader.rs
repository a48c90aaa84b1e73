//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, or defaults when it is absent.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        config.logging.dir = Self::expand_path(&config.logging.dir.to_string_lossy()).into();
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "${...}".to_string(),
            message: e.to_string(),
        })?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.smartlocate`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.polling.interval_ms, 2000);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [service]
            api_key = "sk-test"
            base_url = "http://localhost:8000"

            [locator]
            test_case = "checkout"
            interactive = true
            priority_tags = ["button", "select"]

            [polling]
            interval_ms = 250
            timeout_seconds = 90

            [browser]
            endpoint = "http://127.0.0.1:9333"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.service.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.locator.test_case, "checkout");
        assert!(config.locator.interactive);
        assert_eq!(config.locator.priority_tags, vec!["button", "select"]);
        assert_eq!(config.polling.interval_ms, 250);
        assert_eq!(config.polling.timeout_seconds, Some(90));
        assert_eq!(config.browser.endpoint, "http://127.0.0.1:9333");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[locator]").unwrap();
        writeln!(file, "test_case = \"login\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.locator.test_case, "login");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/smartlocate.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/smartlocate.toml")).unwrap();
        assert_eq!(config.locator.test_case, "default");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_expands_log_dir() {
        let content = r#"
            [logging]
            dir = "~/smartlocate-logs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.logging.dir.to_string_lossy().starts_with('~'));
        assert!(config.logging.dir.ends_with("smartlocate-logs"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("SMARTLOCATE_TEST_CONFIG_VAR", "test_value");
        }
        let content = "value = \"${SMARTLOCATE_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("test_value"));
        unsafe {
            std::env::remove_var("SMARTLOCATE_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_SMARTLOCATE_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/var/log"), "/var/log");
    }
}
