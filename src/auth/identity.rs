//! Caller identification
//!
//! The hosting platform owns login. This service only learns *who* is calling,
//! either from a bearer token it issued or from a header set by the platform's proxy.

use crate::auth::jwt::JwtHandler;
use crate::config::{AuthConfig, IdentityMode};
use crate::utils::error::{ClubhouseError, Result};
use actix_web::http::header::{AUTHORIZATION, HeaderMap, HeaderName};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Resolves the authenticated user of a request
#[async_trait]
pub trait CallerIdentity: Send + Sync {
    /// User id of the caller, `None` for anonymous or unverifiable requests
    async fn identify(&self, headers: &HeaderMap) -> Option<String>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Identity from an HS256 bearer token
#[derive(Debug, Clone)]
pub struct JwtIdentity {
    jwt: Arc<JwtHandler>,
}

impl JwtIdentity {
    pub fn new(jwt: Arc<JwtHandler>) -> Self {
        Self { jwt }
    }
}

#[async_trait]
impl CallerIdentity for JwtIdentity {
    async fn identify(&self, headers: &HeaderMap) -> Option<String> {
        let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = JwtHandler::extract_token_from_header(header)?;

        match self.jwt.verify_token(token) {
            Ok(claims) if !claims.sub.trim().is_empty() => Some(claims.sub),
            Ok(_) => None,
            Err(e) => {
                debug!("Ignoring invalid bearer token: {}", e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "jwt"
    }
}

/// Identity forwarded by the hosting platform in a request header
#[derive(Debug, Clone)]
pub struct TrustedHeaderIdentity {
    header: HeaderName,
}

impl TrustedHeaderIdentity {
    pub fn new(header: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|e| ClubhouseError::config(format!("Invalid user header '{}': {}", header, e)))?;
        Ok(Self { header })
    }
}

#[async_trait]
impl CallerIdentity for TrustedHeaderIdentity {
    async fn identify(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(&self.header)?.to_str().ok()?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn name(&self) -> &'static str {
        "trusted_header"
    }
}

/// Build the identity source selected by configuration
pub fn from_config(config: &AuthConfig, jwt: Arc<JwtHandler>) -> Result<Arc<dyn CallerIdentity>> {
    match config.identity {
        IdentityMode::Jwt => Ok(Arc::new(JwtIdentity::new(jwt))),
        IdentityMode::TrustedHeader => Ok(Arc::new(TrustedHeaderIdentity::new(&config.user_header)?)),
    }
}
