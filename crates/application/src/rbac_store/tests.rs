use super::*;

use paydesk_domain::{PermissionAction, PermissionSummary, PermissionUpdate, RoleUpdate};

fn role(role_id: &str, name: &str) -> Role {
    Role {
        role_id: role_id.to_owned(),
        name: name.to_owned(),
        description: format!("{name} role"),
        is_active: true,
    }
}

fn permission(permission_id: &str, name: &str, group_id: Option<&str>) -> Permission {
    Permission {
        permission_id: permission_id.to_owned(),
        name: name.to_owned(),
        description: format!("{name} permission"),
        action: PermissionAction::Read,
        group_id: group_id.map(str::to_owned),
        route: format!("/console/{permission_id}"),
        is_active: true,
    }
}

fn summary(permission_id: &str) -> PermissionSummary {
    PermissionSummary {
        permission_id: permission_id.to_owned(),
        name: format!("permission {permission_id}"),
        route: format!("/console/{permission_id}"),
        action: PermissionAction::Read,
        is_active: true,
    }
}

fn mapping_entry(role_id: &str, permission_ids: &[&str]) -> RoleWithPermissions {
    RoleWithPermissions {
        role_id: role_id.to_owned(),
        name: format!("role {role_id}"),
        description: String::new(),
        is_active: true,
        permissions: permission_ids.iter().map(|id| summary(id)).collect(),
    }
}

#[tokio::test]
async fn set_roles_clears_loading_and_error() {
    let store = RbacStore::new();
    store.set_loading(RbacCollection::Roles, true).await;
    store
        .set_error(RbacCollection::Roles, Some("boom".to_owned()))
        .await;

    store.set_roles(vec![role("1", "Admin")]).await;

    let status = store.status(RbacCollection::Roles).await;
    assert!(!status.loading);
    assert!(status.error.is_none());
    assert!(status.synced_at.is_some());
}

#[tokio::test]
async fn collection_statuses_are_independent() {
    let store = RbacStore::new();
    store.set_loading(RbacCollection::Permissions, true).await;
    store
        .set_error(RbacCollection::MappedUserRoles, Some("timeout".to_owned()))
        .await;

    assert!(store.status(RbacCollection::Permissions).await.loading);
    assert!(!store.status(RbacCollection::Roles).await.loading);
    assert!(
        store
            .status(RbacCollection::MappedUserRoles)
            .await
            .error
            .is_some()
    );
}

#[tokio::test]
async fn every_role_gets_a_composed_entry() {
    let store = RbacStore::new();
    store
        .set_roles(vec![role("1", "Admin"), role("2", "Support")])
        .await;

    let view = store.roles_with_permissions().await;

    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|entry| entry.permissions.is_empty()));
}

#[tokio::test]
async fn mapping_batch_populates_and_partial_batches_preserve() {
    let store = RbacStore::new();
    store
        .set_roles(vec![role("a", "Admin"), role("b", "Support"), role("c", "Viewer")])
        .await;
    store
        .merge_role_permission_mappings(vec![
            mapping_entry("a", &["p1"]),
            mapping_entry("c", &["p3"]),
        ])
        .await;

    store
        .merge_role_permission_mappings(vec![mapping_entry("a", &["p1", "p2"])])
        .await;

    let view = store.roles_with_permissions().await;
    let entry_a = view.iter().find(|entry| entry.role_id == "a");
    let entry_c = view.iter().find(|entry| entry.role_id == "c");
    assert!(entry_a.is_some_and(|entry| entry.permissions.len() == 2));
    assert!(entry_c.is_some_and(|entry| entry.permissions.len() == 1));
}

#[tokio::test]
async fn mapping_entries_for_unknown_roles_append_last() {
    let store = RbacStore::new();
    store.set_roles(vec![role("1", "Admin")]).await;
    store
        .merge_role_permission_mappings(vec![mapping_entry("9", &["p9"])])
        .await;

    let view = store.roles_with_permissions().await;

    assert_eq!(view.len(), 2);
    assert_eq!(view[0].role_id, "1");
    assert_eq!(view[1].role_id, "9");
}

#[tokio::test]
async fn update_role_patches_matching_entry() {
    let store = RbacStore::new();
    store.set_roles(vec![role("1", "Admin")]).await;

    let outcome = store
        .update_role(
            "1",
            RoleUpdate {
                name: Some("Operator".to_owned()),
                ..RoleUpdate::default()
            },
        )
        .await;

    assert!(outcome.is_applied());
    let view = store.roles_with_permissions().await;
    assert_eq!(view[0].name, "Operator");
}

#[tokio::test]
async fn update_on_unknown_identifier_reports_not_found() {
    let store = RbacStore::new();
    store.set_roles(vec![role("1", "Admin")]).await;

    let outcome = store.update_role("missing", RoleUpdate::default()).await;
    assert_eq!(outcome, MutationOutcome::NotFound);

    let outcome = store
        .update_permission("missing", PermissionUpdate::default())
        .await;
    assert_eq!(outcome, MutationOutcome::NotFound);

    let outcome = store.delete_permission_group("missing").await;
    assert_eq!(outcome, MutationOutcome::NotFound);
}

#[tokio::test]
async fn delete_permission_cascades_into_composed_view() {
    let store = RbacStore::new();
    store.set_roles(vec![role("1", "Admin"), role("2", "Support")]).await;
    store
        .set_permissions(vec![permission("p1", "merchants.read", None)])
        .await;
    store
        .merge_role_permission_mappings(vec![
            mapping_entry("1", &["p1", "p2"]),
            mapping_entry("2", &["p1"]),
        ])
        .await;

    let outcome = store.delete_permission("p1").await;

    assert!(outcome.is_applied());
    let view = store.roles_with_permissions().await;
    for entry in &view {
        assert!(
            entry
                .permissions
                .iter()
                .all(|permission| permission.permission_id != "p1")
        );
    }
}

#[tokio::test]
async fn delete_role_drops_composed_entry_and_mapping_state() {
    let store = RbacStore::new();
    store.set_roles(vec![role("1", "Admin"), role("2", "Support")]).await;
    store
        .merge_role_permission_mappings(vec![mapping_entry("1", &["p1"])])
        .await;

    let outcome = store.delete_role("1").await;

    assert!(outcome.is_applied());
    let view = store.roles_with_permissions().await;
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].role_id, "2");
}

#[tokio::test]
async fn delete_permission_group_clears_dangling_references() {
    let store = RbacStore::new();
    store
        .set_permission_groups(vec![PermissionGroup {
            group_id: "g1".to_owned(),
            name: "Merchant".to_owned(),
            description: String::new(),
            is_active: true,
        }])
        .await;
    store
        .set_permissions(vec![
            permission("p1", "merchants.read", Some("g1")),
            permission("p2", "keys.read", None),
        ])
        .await;

    let outcome = store.delete_permission_group("g1").await;

    assert!(outcome.is_applied());
    let permissions = store.permissions().await;
    assert!(permissions.iter().all(|value| value.group_id.is_none()));
    assert_eq!(permissions.len(), 2);
}

#[tokio::test]
async fn composed_view_changes_are_published() {
    let store = RbacStore::new();
    let mut receiver = store.subscribe_roles_with_permissions();

    store.set_roles(vec![role("1", "Admin")]).await;

    assert!(receiver.has_changed().is_ok_and(|changed| changed));
    let view = receiver.borrow_and_update().clone();
    assert_eq!(view.len(), 1);
}

#[tokio::test]
async fn mapped_user_role_changes_are_published() {
    let store = RbacStore::new();
    let mut receiver = store.subscribe_mapped_user_roles();

    store.set_mapped_user_roles(Vec::new()).await;

    assert!(receiver.has_changed().is_ok_and(|changed| changed));
}
