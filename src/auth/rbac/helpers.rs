//! Validation shared by the role store backends

use std::collections::BTreeSet;

use super::types::DEFAULT_CLUB_TYPE;
use crate::utils::error::{ClubhouseError, Result};
use crate::utils::normalize_club_type;

/// Trimmed, non-empty role name
pub fn validate_role_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClubhouseError::validation("Role name cannot be empty"));
    }
    Ok(name.to_string())
}

/// Normalized club type; `None` selects the default
pub fn resolve_club_type(club_type: Option<&str>) -> Result<String> {
    match club_type {
        None => Ok(DEFAULT_CLUB_TYPE.to_string()),
        Some(raw) => {
            let normalized = normalize_club_type(raw);
            if normalized.is_empty() {
                return Err(ClubhouseError::validation("Club type cannot be empty"));
            }
            Ok(normalized)
        }
    }
}

/// Trim every permission and reject empty ones
pub fn normalize_permissions<I, S>(permissions: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = BTreeSet::new();
    for permission in permissions {
        let permission = permission.as_ref().trim();
        if permission.is_empty() {
            return Err(ClubhouseError::validation("Permission names cannot be empty"));
        }
        normalized.insert(permission.to_string());
    }
    Ok(normalized)
}

pub fn duplicate_role_error(name: &str, club_type: &str) -> ClubhouseError {
    ClubhouseError::validation(format!(
        "Role '{}' already exists for club type '{}'",
        name, club_type
    ))
}

pub fn role_not_found(role_id: i32) -> ClubhouseError {
    ClubhouseError::not_found(format!("Role {}", role_id))
}
