//! Authorization gate
//!
//! Decides, for one operation and one caller, whether the request may reach its
//! handler. Requirements are read from the [`PermissionRegistry`] and checked
//! in declaration order against a permission set resolved once per decision.

use super::audit::{AuditRecorder, DenialEvent, DenialKind};
use super::permissions::PermissionResolver;
use super::registry::PermissionRegistry;
use super::types::OperationKey;
use crate::utils::error::{ClubhouseError, Result};
use actix_web::http::Method;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a gate decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Denied(DenialReason),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    AuthenticationRequired,
    /// First declared permission the caller does not hold
    MissingPermission(String),
    /// `METHOD /path` under a protected prefix with no bound operation
    UndeclaredRoute(String),
}

impl DenialReason {
    pub fn kind(&self) -> DenialKind {
        match self {
            Self::AuthenticationRequired => DenialKind::AuthenticationRequired,
            Self::MissingPermission(_) => DenialKind::MissingPermission,
            Self::UndeclaredRoute(_) => DenialKind::UndeclaredRoute,
        }
    }

    pub fn permission(&self) -> Option<&str> {
        match self {
            Self::AuthenticationRequired | Self::UndeclaredRoute(_) => None,
            Self::MissingPermission(permission) => Some(permission),
        }
    }
}

impl From<DenialReason> for ClubhouseError {
    fn from(reason: DenialReason) -> Self {
        match reason {
            DenialReason::AuthenticationRequired => ClubhouseError::AuthenticationRequired,
            DenialReason::MissingPermission(permission) => {
                ClubhouseError::PermissionDenied(permission)
            }
            DenialReason::UndeclaredRoute(route) => {
                ClubhouseError::not_found(format!("Route {}", route))
            }
        }
    }
}

/// Request-time enforcement of declared permissions
#[derive(Clone)]
pub struct AuthorizationGate {
    registry: Arc<PermissionRegistry>,
    resolver: Arc<dyn PermissionResolver>,
    audit: Arc<dyn AuditRecorder>,
}

impl AuthorizationGate {
    pub fn new(
        registry: Arc<PermissionRegistry>,
        resolver: Arc<dyn PermissionResolver>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            registry,
            resolver,
            audit,
        }
    }

    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    /// Decide whether `caller` may perform `operation`
    pub async fn authorize(
        &self,
        operation: &OperationKey,
        caller: Option<&str>,
    ) -> Result<GateDecision> {
        self.decide(operation, caller, None).await
    }

    /// Decide for an HTTP request
    ///
    /// `path` must be the decoded path the router matches on. Routes not bound
    /// to any operation carry no requirements, unless they lie below a
    /// protected prefix, where they are denied.
    pub async fn authorize_route(
        &self,
        method: &Method,
        path: &str,
        caller: Option<&str>,
    ) -> Result<GateDecision> {
        let route = format!("{} {}", method, path);
        let Some(operation) = self.registry.operation_for(method, path) else {
            if self.registry.is_protected(path) {
                let reason = DenialReason::UndeclaredRoute(route.clone());
                return Ok(self.deny(None, caller, Some(route), reason));
            }
            debug!("No operation bound to {}", route);
            return Ok(GateDecision::Allowed);
        };

        self.decide(operation, caller, Some(route)).await
    }

    async fn decide(
        &self,
        operation: &OperationKey,
        caller: Option<&str>,
        route: Option<String>,
    ) -> Result<GateDecision> {
        let requirements = self.registry.requirements(operation);
        if requirements.is_empty() {
            return Ok(GateDecision::Allowed);
        }

        let Some(user_id) = caller else {
            return Ok(self.deny(
                Some(operation),
                None,
                route,
                DenialReason::AuthenticationRequired,
            ));
        };

        let held = self.resolver.effective_permissions(user_id).await?;
        if let Some(missing) = requirements.into_iter().find(|p| !held.contains(p)) {
            return Ok(self.deny(
                Some(operation),
                Some(user_id),
                route,
                DenialReason::MissingPermission(missing),
            ));
        }

        debug!("Allowed {} for {}", operation, user_id);
        Ok(GateDecision::Allowed)
    }

    fn deny(
        &self,
        operation: Option<&OperationKey>,
        user_id: Option<&str>,
        route: Option<String>,
        reason: DenialReason,
    ) -> GateDecision {
        self.audit.record_denial(DenialEvent {
            user_id: user_id.map(str::to_string),
            operation: operation.map(ToString::to_string),
            route,
            permission: reason.permission().map(str::to_string),
            reason: reason.kind(),
            timestamp: Utc::now(),
        });
        GateDecision::Denied(reason)
    }
}
