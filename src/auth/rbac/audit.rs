//! Denial audit trail

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::warn;

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    AuthenticationRequired,
    MissingPermission,
    /// Path under a protected prefix with no bound operation
    UndeclaredRoute,
}

/// One denied authorization decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialEvent {
    pub user_id: Option<String>,
    /// `resource#operation`, absent for undeclared routes
    pub operation: Option<String>,
    /// `METHOD /path` when the decision came from an HTTP request
    pub route: Option<String>,
    /// The first missing permission
    pub permission: Option<String>,
    pub reason: DenialKind,
    pub timestamp: DateTime<Utc>,
}

/// Sink for denial events
pub trait AuditRecorder: Send + Sync {
    fn record_denial(&self, event: DenialEvent);
}

/// Logs denials and keeps the most recent ones in memory
#[derive(Debug)]
pub struct AuditLog {
    capacity: usize,
    recent: Mutex<VecDeque<DenialEvent>>,
}

impl AuditLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Most recent denials, newest first
    pub fn recent(&self, limit: usize) -> Vec<DenialEvent> {
        self.recent.lock().iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.recent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.lock().is_empty()
    }
}

impl AuditRecorder for AuditLog {
    fn record_denial(&self, event: DenialEvent) {
        warn!(
            target: "clubhouse::audit",
            user = event.user_id.as_deref().unwrap_or("-"),
            operation = event.operation.as_deref().unwrap_or("-"),
            route = event.route.as_deref().unwrap_or("-"),
            permission = event.permission.as_deref().unwrap_or("-"),
            reason = ?event.reason,
            "Access denied"
        );

        if self.capacity == 0 {
            return;
        }
        let mut recent = self.recent.lock();
        while recent.len() >= self.capacity {
            recent.pop_front();
        }
        recent.push_back(event);
    }
}
