//! Derivation of the denormalized roles-with-permissions view.
//!
//! Both functions are pure: the entity store applies them on read so that no
//! manual merge logic ever writes a partially updated view.

use crate::rbac::{Role, RoleWithPermissions};

/// Aligns the composed view with the authoritative role collection.
///
/// Produces exactly one entry per role, in role-collection order. A role
/// already present in `existing_view` carries its permission list forward and
/// refreshes name, description, and active flag from the authoritative record;
/// an unseen role synthesizes an entry with an empty permission list. Entries
/// for roles no longer in the collection are dropped.
#[must_use]
pub fn recompose(
    roles: &[Role],
    existing_view: &[RoleWithPermissions],
) -> Vec<RoleWithPermissions> {
    roles
        .iter()
        .map(|role| {
            existing_view
                .iter()
                .find(|entry| entry.role_id == role.role_id)
                .map(|entry| RoleWithPermissions {
                    role_id: role.role_id.clone(),
                    name: role.name.clone(),
                    description: role.description.clone(),
                    is_active: role.is_active,
                    permissions: entry.permissions.clone(),
                })
                .unwrap_or_else(|| RoleWithPermissions::from_role(role))
        })
        .collect()
}

/// Merges an incoming mapping batch into the composed view.
///
/// Each incoming entry replaces the view entry with the same role identifier
/// wholesale, or is appended last when unseen. View entries absent from the
/// batch are preserved untouched: a response describing only roles A and B must
/// not erase role C's previously known permissions.
#[must_use]
pub fn merge_mapping_batch(
    view: &[RoleWithPermissions],
    incoming: Vec<RoleWithPermissions>,
) -> Vec<RoleWithPermissions> {
    let mut merged: Vec<RoleWithPermissions> = view.to_vec();

    for entry in incoming {
        match merged
            .iter_mut()
            .find(|existing| existing.role_id == entry.role_id)
        {
            Some(existing) => *existing = entry,
            None => merged.push(entry),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::rbac::{PermissionAction, PermissionSummary, Role};

    use super::{RoleWithPermissions, merge_mapping_batch, recompose};

    fn role(role_id: &str, name: &str) -> Role {
        Role {
            role_id: role_id.to_owned(),
            name: name.to_owned(),
            description: format!("{name} role"),
            is_active: true,
        }
    }

    fn permission(permission_id: &str) -> PermissionSummary {
        PermissionSummary {
            permission_id: permission_id.to_owned(),
            name: format!("permission {permission_id}"),
            route: format!("/console/{permission_id}"),
            action: PermissionAction::Read,
            is_active: true,
        }
    }

    fn entry(role_id: &str, permission_ids: &[&str]) -> RoleWithPermissions {
        RoleWithPermissions {
            role_id: role_id.to_owned(),
            name: format!("role {role_id}"),
            description: String::new(),
            is_active: true,
            permissions: permission_ids.iter().map(|id| permission(id)).collect(),
        }
    }

    #[test]
    fn recompose_synthesizes_empty_entries_for_new_roles() {
        let roles = vec![role("1", "Admin"), role("2", "Support")];

        let view = recompose(&roles, &[]);

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].role_id, "1");
        assert!(view[0].permissions.is_empty());
        assert_eq!(view[1].role_id, "2");
        assert!(view[1].permissions.is_empty());
    }

    #[test]
    fn recompose_carries_known_permissions_forward() {
        let roles = vec![role("1", "Admin")];
        let existing = vec![entry("1", &["p1", "p2"])];

        let view = recompose(&roles, &existing);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].permissions.len(), 2);
        assert_eq!(view[0].name, "Admin");
    }

    #[test]
    fn recompose_drops_roles_removed_from_collection() {
        let roles = vec![role("2", "Support")];
        let existing = vec![entry("1", &["p1"]), entry("2", &["p2"])];

        let view = recompose(&roles, &existing);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].role_id, "2");
    }

    #[test]
    fn recompose_refreshes_role_fields_from_authoritative_list() {
        let mut renamed = role("1", "Merchant Admin");
        renamed.is_active = false;
        let existing = vec![entry("1", &["p1"])];

        let view = recompose(&[renamed], &existing);

        assert_eq!(view[0].name, "Merchant Admin");
        assert!(!view[0].is_active);
        assert_eq!(view[0].permissions.len(), 1);
    }

    #[test]
    fn merge_replaces_matching_entries_and_appends_unseen_last() {
        let view = vec![entry("1", &["p1"]), entry("2", &["p2"])];
        let incoming = vec![entry("2", &["p3"]), entry("9", &["p9"])];

        let merged = merge_mapping_batch(&view, incoming);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].permissions[0].permission_id, "p1");
        assert_eq!(merged[1].permissions[0].permission_id, "p3");
        assert_eq!(merged[2].role_id, "9");
    }

    #[test]
    fn merge_preserves_entries_absent_from_batch() {
        let view = vec![entry("a", &["p1"]), entry("b", &["p2"]), entry("c", &["p3"])];
        let incoming = vec![entry("a", &["p4"]), entry("b", &["p5"])];

        let merged = merge_mapping_batch(&view, incoming);

        let untouched = merged.iter().find(|value| value.role_id == "c");
        assert_eq!(untouched, view.iter().find(|value| value.role_id == "c"));
    }

    #[test]
    fn mapping_batch_for_single_role_populates_its_permissions() {
        let roles = vec![role("1", "Admin")];
        let view = recompose(&roles, &[]);

        let merged = merge_mapping_batch(&view, vec![entry("1", &["p1"])]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].role_id, "1");
        assert_eq!(merged[0].permissions.len(), 1);
        assert_eq!(merged[0].permissions[0].permission_id, "p1");
    }

    fn arbitrary_role_ids() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::hash_set("[a-z][a-z0-9]{0,4}", 0..8)
            .prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn recompose_yields_exactly_one_entry_per_role(
            role_ids in arbitrary_role_ids(),
            existing_ids in arbitrary_role_ids(),
        ) {
            let roles: Vec<Role> = role_ids
                .iter()
                .map(|id| role(id, id))
                .collect();
            let existing: Vec<RoleWithPermissions> = existing_ids
                .iter()
                .map(|id| entry(id, &["p1"]))
                .collect();

            let view = recompose(&roles, &existing);

            prop_assert_eq!(view.len(), roles.len());
            for (role, composed) in roles.iter().zip(view.iter()) {
                prop_assert_eq!(&role.role_id, &composed.role_id);
            }
        }

        #[test]
        fn merge_never_drops_known_entries(
            view_ids in arbitrary_role_ids(),
            batch_ids in arbitrary_role_ids(),
        ) {
            let view: Vec<RoleWithPermissions> =
                view_ids.iter().map(|id| entry(id, &["p1"])).collect();
            let incoming: Vec<RoleWithPermissions> =
                batch_ids.iter().map(|id| entry(id, &["p2"])).collect();

            let merged = merge_mapping_batch(&view, incoming);

            for known in &view {
                prop_assert!(merged.iter().any(|value| value.role_id == known.role_id));
            }
            for id in &view_ids {
                if !batch_ids.contains(id) {
                    let untouched = merged.iter().find(|value| &value.role_id == id);
                    prop_assert_eq!(
                        untouched,
                        view.iter().find(|value| &value.role_id == id)
                    );
                }
            }
        }
    }
}
