pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (dev = local, prod = deployed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load a required environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Helper to load and parse an environment variable, falling back to a default
pub fn env_parsed_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse().map_err(|e| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
            assert!(env.is_production());
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var_unset("MISSING_KEY", || {
            assert_eq!(env_or_default("MISSING_KEY", "fallback"), "fallback");
        });
        temp_env::with_var("PRESENT_KEY", Some("value"), || {
            assert_eq!(env_or_default("PRESENT_KEY", "fallback"), "value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("REQUIRED_KEY", || {
            let err = env_required("REQUIRED_KEY").unwrap_err();
            assert!(err.to_string().contains("REQUIRED_KEY"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parsed_or() {
        temp_env::with_var("NUM_KEY", Some("42"), || {
            let value: u32 = env_parsed_or("NUM_KEY", 7).unwrap();
            assert_eq!(value, 42);
        });
        temp_env::with_var_unset("NUM_KEY", || {
            let value: u32 = env_parsed_or("NUM_KEY", 7).unwrap();
            assert_eq!(value, 7);
        });
        temp_env::with_var("NUM_KEY", Some("not-a-number"), || {
            let err = env_parsed_or::<u32>("NUM_KEY", 7).unwrap_err();
            assert!(err.to_string().contains("NUM_KEY"));
        });
    }
}
