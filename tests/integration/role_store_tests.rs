//! Role store integration tests
//!
//! Every test runs against the in-memory store and in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::common::database::{TestDatabase, all_backends};
    use crate::{assert_err, assert_ok};
    use clubhouse::ClubhouseError;
    use clubhouse::auth::rbac::{NewRole, RoleUpdate};
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn test_create_and_get_role() {
        for (backend, store) in all_backends().await {
            let created = assert_ok!(
                store
                    .create_role(
                        NewRole::new(" Treasurer ")
                            .with_club_type("Sports")
                            .with_description("Keeps the books")
                            .with_permissions(["finance.view", "finance.export", "finance.view"]),
                    )
                    .await
            );

            assert_eq!(created.name, "Treasurer", "{}", backend);
            assert_eq!(created.club_type, "sports", "{}", backend);
            assert_eq!(
                created.permissions,
                BTreeSet::from(["finance.export".to_string(), "finance.view".to_string()]),
                "{}",
                backend
            );

            let fetched = assert_ok!(store.get_role(created.id).await).expect(backend);
            assert_eq!(fetched.name, created.name, "{}", backend);
            assert_eq!(fetched.permissions, created.permissions, "{}", backend);
            assert!(assert_ok!(store.get_role(created.id + 100).await).is_none());
        }
    }

    #[tokio::test]
    async fn test_default_club_type() {
        for (backend, store) in all_backends().await {
            let role = assert_ok!(store.create_role(NewRole::new("Member")).await);
            assert_eq!(role.club_type, "general", "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_name_unique_per_club_type() {
        for (backend, store) in all_backends().await {
            assert_ok!(store.create_role(NewRole::new("Coach").with_club_type("sports")).await);
            assert_ok!(store.create_role(NewRole::new("Coach").with_club_type("music")).await);

            let err = assert_err!(
                store
                    .create_role(NewRole::new("Coach").with_club_type("SPORTS"))
                    .await
            );
            assert!(matches!(err, ClubhouseError::Validation(_)), "{}: {}", backend, err);
            assert_eq!(assert_ok!(store.list_roles().await).len(), 2, "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_creation() {
        for (backend, store) in all_backends().await {
            let (first, second) = tokio::join!(
                store.create_role(NewRole::new("Treasurer")),
                store.create_role(NewRole::new(" Treasurer").with_club_type("General"))
            );

            let created = [&first, &second].iter().filter(|r| r.is_ok()).count();
            assert_eq!(created, 1, "{}", backend);
            let err = [first, second].into_iter().find_map(Result::err).expect(backend);
            assert!(matches!(err, ClubhouseError::Validation(_)), "{}: {}", backend, err);
        }
    }

    #[tokio::test]
    async fn test_invalid_roles_are_rejected() {
        for (backend, store) in all_backends().await {
            let err = assert_err!(store.create_role(NewRole::new("  ")).await);
            assert!(matches!(err, ClubhouseError::Validation(_)), "{}", backend);

            let err = assert_err!(
                store
                    .create_role(NewRole::new("Editor").with_permissions(["news.edit", " "]))
                    .await
            );
            assert!(matches!(err, ClubhouseError::Validation(_)), "{}", backend);
            assert!(assert_ok!(store.list_roles().await).is_empty(), "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_update_role() {
        for (backend, store) in all_backends().await {
            let role = assert_ok!(
                store
                    .create_role(NewRole::new("Secretary").with_permissions(["members.view"]))
                    .await
            );
            let other = assert_ok!(store.create_role(NewRole::new("Chair")).await);

            let updated = assert_ok!(
                store
                    .update_role(
                        role.id,
                        RoleUpdate {
                            permissions: Some(vec![
                                "members.view".to_string(),
                                "members.edit".to_string(),
                            ]),
                            ..Default::default()
                        },
                    )
                    .await
            );
            assert_eq!(updated.name, "Secretary", "{}", backend);
            assert!(updated.grants("members.edit"), "{}", backend);

            let err = assert_err!(
                store
                    .update_role(
                        role.id,
                        RoleUpdate {
                            name: Some(other.name.clone()),
                            ..Default::default()
                        },
                    )
                    .await
            );
            assert!(matches!(err, ClubhouseError::Validation(_)), "{}", backend);

            let err = assert_err!(store.update_role(999, RoleUpdate::default()).await);
            assert!(matches!(err, ClubhouseError::NotFound(_)), "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_assignment_is_idempotent() {
        for (backend, store) in all_backends().await {
            let role = assert_ok!(store.create_role(NewRole::new("Treasurer")).await);

            assert_ok!(store.assign_role("alice", role.id).await);
            assert_ok!(store.assign_role("alice", role.id).await);
            assert_eq!(assert_ok!(store.roles_for_user("alice").await).len(), 1, "{}", backend);

            assert_ok!(store.revoke_role("alice", role.id).await);
            assert_ok!(store.revoke_role("alice", role.id).await);
            assert!(assert_ok!(store.roles_for_user("alice").await).is_empty(), "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_assign_unknown_role() {
        for (backend, store) in all_backends().await {
            let err = assert_err!(store.assign_role("alice", 42).await);
            assert!(matches!(err, ClubhouseError::NotFound(_)), "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_delete_cascades_to_assignments() {
        for (backend, store) in all_backends().await {
            let treasurer = assert_ok!(store.create_role(NewRole::new("Treasurer")).await);
            let secretary = assert_ok!(store.create_role(NewRole::new("Secretary")).await);
            assert_ok!(store.assign_role("alice", treasurer.id).await);
            assert_ok!(store.assign_role("alice", secretary.id).await);
            assert_ok!(store.assign_role("bob", treasurer.id).await);

            assert_ok!(store.delete_role(treasurer.id).await);

            let alice: Vec<String> = assert_ok!(store.roles_for_user("alice").await)
                .into_iter()
                .map(|r| r.name)
                .collect();
            assert_eq!(alice, vec!["Secretary"], "{}", backend);
            assert!(assert_ok!(store.roles_for_user("bob").await).is_empty(), "{}", backend);

            let err = assert_err!(store.delete_role(treasurer.id).await);
            assert!(matches!(err, ClubhouseError::NotFound(_)), "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_roles_by_name_and_revoke_all() {
        for (backend, store) in all_backends().await {
            let board = assert_ok!(store.create_role(NewRole::new("Board")).await);
            assert_ok!(store.create_role(NewRole::new("Board").with_club_type("sports")).await);
            let coach = assert_ok!(store.create_role(NewRole::new("Coach").with_club_type("sports")).await);

            let names = vec!["Board".to_string()];
            assert_eq!(assert_ok!(store.roles_by_name(&names, None).await).len(), 2, "{}", backend);

            let general = assert_ok!(store.roles_by_name(&names, Some("General")).await);
            assert_eq!(general.len(), 1, "{}", backend);
            assert_eq!(general[0].id, board.id, "{}", backend);

            assert_ok!(store.assign_role("carol", board.id).await);
            assert_ok!(store.assign_role("carol", coach.id).await);
            assert_eq!(assert_ok!(store.revoke_all_for_user("carol").await), 2, "{}", backend);
            assert_eq!(assert_ok!(store.revoke_all_for_user("carol").await), 0, "{}", backend);
        }
    }

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().ping().await);
        assert_ok!(db.store().health_check().await);
    }
}
