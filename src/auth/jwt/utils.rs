//! JWT utility functions

use super::types::{Claims, JwtHandler};
use crate::utils::current_timestamp;

impl JwtHandler {
    /// Extract token from Authorization header
    pub fn extract_token_from_header(header_value: &str) -> Option<&str> {
        header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Get time until token expires
    pub fn time_until_expiry(&self, claims: &Claims) -> Option<u64> {
        let now = current_timestamp();
        if claims.exp > now {
            Some(claims.exp - now)
        } else {
            None
        }
    }
}
