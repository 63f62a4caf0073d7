//! Caller identity configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the service learns who is calling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// HS256 bearer token whose `sub` claim is the user id
    #[default]
    Jwt,
    /// User id forwarded by the hosting platform in a request header
    TrustedHeader,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity source
    #[serde(default)]
    pub identity: IdentityMode,
    /// JWT secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// JWT issuer
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Header carrying the user id in `trusted_header` mode
    #[serde(default = "default_user_header")]
    pub user_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity: IdentityMode::default(),
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            jwt_issuer: default_jwt_issuer(),
            user_header: default_user_header(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.identity {
            IdentityMode::Jwt => {
                if self.jwt_secret.len() < 32 {
                    return Err(
                        "JWT secret must be at least 32 characters long for security".to_string(),
                    );
                }

                if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
                    return Err("JWT secret must not use default values. Please generate a secure random secret.".to_string());
                }

                if self.jwt_secret.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(
                        "JWT secret should contain mixed case letters, numbers, and special characters"
                            .to_string(),
                    );
                }

                if self.jwt_expiration < 60 {
                    return Err("JWT expiration should be at least 60 seconds".to_string());
                }

                if self.jwt_issuer.is_empty() {
                    return Err("JWT issuer cannot be empty".to_string());
                }
            }
            IdentityMode::TrustedHeader => {
                if self.user_header.trim().is_empty() {
                    return Err(
                        "User header name cannot be empty in trusted_header mode".to_string(),
                    );
                }
                if actix_web::http::header::HeaderName::from_bytes(self.user_header.as_bytes())
                    .is_err()
                {
                    return Err(format!("Invalid user header name: {}", self.user_header));
                }
            }
        }

        Ok(())
    }
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about identity settings that only make sense behind a trusted proxy
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.identity == IdentityMode::TrustedHeader {
        warn!(
            header = %config.user_header,
            "Caller identity is taken from a request header. Only expose this service behind the hosting platform's proxy."
        );
    }
}
