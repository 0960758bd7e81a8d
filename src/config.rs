//! Application configuration loaded from environment variables.
//!
//! Secrets (the session signing key) are read once at startup; on Cloud Run
//! they arrive as env vars via secret bindings.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Firebase project ID, the audience/issuer of incoming ID tokens.
    /// Usually the same as the GCP project.
    pub firebase_project_id: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// HS256 signing key for session tokens (raw bytes)
    pub session_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gcp_project_id =
            env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());

        Ok(Self {
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .unwrap_or_else(|_| gcp_project_id.clone()),
            gcp_project_id,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            firebase_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            session_signing_key: b"test_session_key_32_bytes_min!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("SESSION_SIGNING_KEY", "test_session_key_32_bytes_min!!");
        env::set_var("GCP_PROJECT_ID", "deedsie-test");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gcp_project_id, "deedsie-test");
        assert_eq!(config.firebase_project_id, "deedsie-test");
        assert_eq!(config.port, 8080);
    }
}
