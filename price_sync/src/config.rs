//! Environment-backed runtime configuration.
//!
//! Credentials and the database location come from the environment (a
//! `.env` file is honored by the binary). API keys are wrapped in
//! [`SecretString`] so they never appear in debug output or logs.

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Location of the job/price database.
pub fn database_url() -> Result<String, ConfigError> {
    require_env("DATABASE_URL")
}

/// API key for the primary time-series provider.
pub fn alpha_api_key() -> Result<SecretString, ConfigError> {
    require_env("ALPHA_VANTAGE_API_KEY").map(|key| SecretString::new(key.into()))
}
