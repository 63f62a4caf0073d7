//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::fixtures::club_directory;
    use clubhouse::Config;
    use clubhouse::server::AppState;
    use clubhouse::storage::MemoryRoleStore;
    use clubhouse::auth::rbac::OperationKey;
    use std::io::Write;
    use std::sync::Arc;

    const CLUB_YAML: &str = r#"
server:
  host: 127.0.0.1
  port: 9090
auth:
  identity: trusted_header
  user_header: X-Member
rbac:
  club_type: Sports
  group_roles:
    committee: Board
  seed_roles:
    - name: Board
      permissions: [finance.view, members.edit]
  operations:
    - resource: finance
      permissions: [finance.view]
    - resource: finance
      operation: export
      permissions: [finance.export]
      route:
        method: GET
        path: /api/finance/export
directory:
  users:
    - id: dana
      groups: [committee]
"#;

    #[tokio::test]
    async fn test_load_club_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CLUB_YAML.as_bytes()).unwrap();

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.server().port, 9090);
        assert_eq!(config.rbac().seed_roles.len(), 1);
        assert_eq!(config.directory().users[0].id, "dana");
    }

    #[tokio::test]
    async fn test_configured_declarations_reach_the_gate() {
        let config = assert_ok!(Config::from_yaml_str(CLUB_YAML));
        let state = assert_ok!(AppState::from_config(config).await);
        assert_eq!(state.rbac.club_type(), "sports");

        let export = OperationKey::new("finance", "export");
        assert_eq!(
            state.gate.registry().requirements(&export),
            vec!["finance.view", "finance.export"]
        );

        // dana holds Board through the committee group but not finance.export
        let decision = assert_ok!(state.gate.authorize(&export, Some("dana")).await);
        assert!(!decision.is_allowed());
        let view = OperationKey::new("finance", "view");
        assert!(assert_ok!(state.gate.authorize(&view, Some("dana")).await).is_allowed());
    }

    #[test]
    fn test_malformed_declaration_fails_at_startup() {
        let mut config = Config::default();
        config.app.rbac.operations.push(clubhouse::config::OperationDeclaration {
            resource: "finance".to_string(),
            operation: Some("export".to_string()),
            permissions: vec!["finance.export".to_string()],
            route: Some(clubhouse::config::RouteDeclaration {
                method: "GET".to_string(),
                path: "no-leading-slash".to_string(),
            }),
        });

        let result = AppState::new(config, Arc::new(MemoryRoleStore::new()), Arc::new(club_directory()));
        assert!(result.is_err());
    }
}
