//! # SmartLocate Config
//!
//! Configuration management for the SmartLocate element locator.

mod env;
mod error;
mod loader;
mod schema;
mod validator;

pub use env::{EnvOverrides, ENV_API_KEY, ENV_INTERACTIVE, ENV_URL};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
