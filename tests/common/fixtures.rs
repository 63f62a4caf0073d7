//! Test fixtures
//!
//! The club used throughout: `alice` and `bob` are plain members, `admin`
//! belongs to the `club-Administrator` group, and `finance#export` is bound
//! to `GET /api/finance/export` behind `finance.export`.

use clubhouse::auth::directory::StaticUserDirectory;
use clubhouse::config::{
    Config, IdentityMode, OperationDeclaration, RoleSeed, RouteDeclaration,
};
use clubhouse::server::AppState;
use clubhouse::storage::RoleStore;
use std::sync::Arc;

/// Header carrying the caller in tests
pub const USER_HEADER: &str = "X-Remote-User";
pub const JWT_SECRET: &str = "Integration-Test-Secret-0123456789-ABCDEF";

/// Configuration with trusted-header identity and the finance operation
pub fn club_config() -> Config {
    let mut config = Config::default();
    config.app.auth.identity = IdentityMode::TrustedHeader;
    config.app.auth.user_header = USER_HEADER.to_string();
    config.app.auth.jwt_secret = JWT_SECRET.to_string();

    config.app.rbac.seed_roles = vec![RoleSeed {
        name: "Administrator".to_string(),
        club_type: None,
        description: "Manages roles".to_string(),
        permissions: vec!["roles.manage".to_string(), "audit.view".to_string()],
    }];
    config.app.rbac.operations = vec![
        OperationDeclaration {
            resource: "finance".to_string(),
            operation: Some("export".to_string()),
            permissions: vec!["finance.export".to_string()],
            route: Some(RouteDeclaration {
                method: "GET".to_string(),
                path: "/api/finance/export".to_string(),
            }),
        },
        OperationDeclaration {
            resource: "events".to_string(),
            operation: Some("calendar".to_string()),
            permissions: Vec::new(),
            route: Some(RouteDeclaration {
                method: "GET".to_string(),
                path: "/api/events/calendar".to_string(),
            }),
        },
    ];
    config
}

pub fn club_directory() -> StaticUserDirectory {
    StaticUserDirectory::new()
        .with_user("alice", Vec::<String>::new())
        .with_user("bob", Vec::<String>::new())
        .with_user("admin", ["club-Administrator"])
}

/// Application state over the given store with seeded roles
pub async fn club_state(store: Arc<dyn RoleStore>) -> AppState {
    club_state_with(club_config(), store).await
}

pub async fn club_state_with(config: Config, store: Arc<dyn RoleStore>) -> AppState {
    let state = AppState::new(config, store, Arc::new(club_directory()))
        .expect("Failed to build application state");
    state
        .rbac
        .seed_roles(&state.config.rbac().seed_roles)
        .await
        .expect("Failed to seed roles");
    state
}
