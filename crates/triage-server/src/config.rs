//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use triage_model::artifacts::{DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE};
use triage_model::ArtifactPaths;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// JWT signing secret. Required; the server refuses to start
    /// without it.
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    pub jwt_expire_minutes: u64,
    /// Complaint ledger file.
    pub data_file: PathBuf,
    /// Staff credential file.
    pub users_file: PathBuf,
    /// Serialized classifier artifact.
    pub model_file: PathBuf,
    /// Serialized vectorizer artifact.
    pub vectorizer_file: PathBuf,
    /// Directory of static frontend assets, served when present.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: token signing secret
    ///
    /// Optional:
    /// - `PORT` (default: 3000)
    /// - `LOG_LEVEL` (default: "info")
    /// - `CORS_ALLOWED_ORIGINS` (default: "*")
    /// - `JWT_EXPIRE_MINUTES` (default: 120)
    /// - `DATA_FILE` (default: "complaints.json")
    /// - `USERS_FILE` (default: "users.json")
    /// - `MODEL_FILE` / `VECTORIZER_FILE` (defaults: the artifact names
    ///   the trainer writes)
    /// - `STATIC_DIR` (default: "static")
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let jwt_expire_minutes = env::var("JWT_EXPIRE_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120);

        let data_file = path_var("DATA_FILE", "complaints.json");
        let users_file = path_var("USERS_FILE", "users.json");
        let model_file = path_var("MODEL_FILE", DEFAULT_MODEL_FILE);
        let vectorizer_file = path_var("VECTORIZER_FILE", DEFAULT_VECTORIZER_FILE);
        let static_dir = path_var("STATIC_DIR", "static");

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            jwt_secret,
            jwt_expire_minutes,
            data_file,
            users_file,
            model_file,
            vectorizer_file,
            static_dir,
        })
    }

    /// The artifact path pair to load the model from.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(self.vectorizer_file.clone(), self.model_file.clone())
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An entry in `CORS_ALLOWED_ORIGINS` is not a valid header value.
    #[error("invalid CORS origin: {0:?}")]
    InvalidCorsOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both halves manipulate JWT_SECRET, so they share one test body
    // rather than race each other.
    #[test]
    fn test_missing_secret_then_default_values() {
        // SAFETY: This test is not run in parallel with other tests that read JWT_SECRET.
        unsafe { env::remove_var("JWT_SECRET") };

        let err = ServerConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(var) if var == "JWT_SECRET"));

        // SAFETY: This test is not run in parallel with other tests that read JWT_SECRET.
        unsafe { env::set_var("JWT_SECRET", "test-secret") };

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert_eq!(config.jwt_expire_minutes, 120);
        assert_eq!(config.data_file, PathBuf::from("complaints.json"));
        assert_eq!(config.users_file, PathBuf::from("users.json"));

        // SAFETY: This test is not run in parallel with other tests that read JWT_SECRET.
        unsafe { env::remove_var("JWT_SECRET") };
    }
}
