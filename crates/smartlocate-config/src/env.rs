//! Environment variable overrides.

use crate::schema::Config;

pub const ENV_API_KEY: &str = "DEVTOOLSAI_API_KEY";
pub const ENV_URL: &str = "DEVTOOLSAI_URL";
pub const ENV_INTERACTIVE: &str = "DEVTOOLSAI_INTERACTIVE";

const TRUTHY: [&str; 5] = ["true", "TRUE", "1", "yes", "YES"];

/// Values read from the environment that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub interactive: Option<bool>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup(ENV_API_KEY).filter(|v| !v.is_empty()),
            base_url: lookup(ENV_URL).filter(|v| !v.is_empty()),
            interactive: lookup(ENV_INTERACTIVE).map(|v| TRUTHY.contains(&v.as_str())),
        }
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(ref key) = self.api_key {
            config.service.api_key = Some(key.clone());
        }
        if let Some(ref url) = self.base_url {
            config.service.base_url = url.clone();
        }
        if let Some(interactive) = self.interactive {
            config.locator.interactive = interactive;
        }
    }
}
