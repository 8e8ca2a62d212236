//! Per-user effective access derived from the composed view.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::rbac::{MappedUserRole, PermissionSummary, RoleSummary, RoleWithPermissions};

/// Effective permission and role grants for one authenticated user.
///
/// Session lifetime only; recomputed whenever any projection input changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveAccess {
    /// Permissions granted through the user's assigned roles, deduplicated by
    /// permission identifier.
    pub permissions: Vec<PermissionSummary>,
    /// Roles assigned to the user that exist in the composed view.
    pub roles: Vec<RoleSummary>,
}

impl EffectiveAccess {
    /// Returns whether the projection grants a permission with this name.
    #[must_use]
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|value| value.name == name)
    }

    /// Returns whether the projection includes a role with this name.
    #[must_use]
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|value| value.name == name)
    }
}

/// Projects the effective access for one user from the composed view.
///
/// A user absent from the mapping collection yields an empty projection. When
/// two assigned roles grant the same permission, the first occurrence wins and
/// the permission appears once.
#[must_use]
pub fn project_effective(
    user_id: &str,
    mapped_user_roles: &[MappedUserRole],
    view: &[RoleWithPermissions],
) -> EffectiveAccess {
    let Some(mapping) = mapped_user_roles
        .iter()
        .find(|entry| entry.user.user_id == user_id)
    else {
        return EffectiveAccess::default();
    };

    let assigned: HashSet<&str> = mapping
        .roles
        .iter()
        .map(|role| role.role_id.as_str())
        .collect();

    let mut permissions = Vec::new();
    let mut seen_permissions: HashSet<&str> = HashSet::new();
    let mut roles = Vec::new();

    for entry in view {
        if !assigned.contains(entry.role_id.as_str()) {
            continue;
        }

        roles.push(RoleSummary {
            role_id: entry.role_id.clone(),
            name: entry.name.clone(),
        });

        for permission in &entry.permissions {
            if seen_permissions.insert(permission.permission_id.as_str()) {
                permissions.push(permission.clone());
            }
        }
    }

    EffectiveAccess { permissions, roles }
}

#[cfg(test)]
mod tests {
    use crate::rbac::{
        MappedUserRole, PermissionAction, PermissionSummary, RoleSummary, RoleWithPermissions,
        UserSummary,
    };

    use super::project_effective;

    fn permission(permission_id: &str, name: &str) -> PermissionSummary {
        PermissionSummary {
            permission_id: permission_id.to_owned(),
            name: name.to_owned(),
            route: format!("/console/{permission_id}"),
            action: PermissionAction::Read,
            is_active: true,
        }
    }

    fn entry(role_id: &str, name: &str, permissions: Vec<PermissionSummary>) -> RoleWithPermissions {
        RoleWithPermissions {
            role_id: role_id.to_owned(),
            name: name.to_owned(),
            description: String::new(),
            is_active: true,
            permissions,
        }
    }

    fn mapping(user_id: &str, role_ids: &[&str]) -> MappedUserRole {
        MappedUserRole {
            user: UserSummary {
                user_id: user_id.to_owned(),
                first_name: "Avery".to_owned(),
                last_name: "Nguyen".to_owned(),
                email: format!("{user_id}@gateway.example"),
            },
            roles: role_ids
                .iter()
                .map(|id| RoleSummary {
                    role_id: (*id).to_owned(),
                    name: format!("role {id}"),
                })
                .collect(),
        }
    }

    #[test]
    fn assigned_roles_grant_their_permissions() {
        let mappings = vec![mapping("u1", &["1"])];
        let view = vec![entry(
            "1",
            "Admin",
            vec![permission("p1", "merchants.read"), permission("p2", "keys.read")],
        )];

        let access = project_effective("u1", &mappings, &view);

        assert_eq!(access.roles.len(), 1);
        assert_eq!(access.roles[0].role_id, "1");
        assert_eq!(access.permissions.len(), 2);
        assert!(access.has_permission("merchants.read"));
        assert!(access.has_role("Admin"));
    }

    #[test]
    fn permission_reachable_via_two_roles_appears_once() {
        let mappings = vec![mapping("u1", &["1", "2"])];
        let shared = permission("p1", "merchants.read");
        let view = vec![
            entry("1", "Admin", vec![shared.clone()]),
            entry("2", "Support", vec![shared, permission("p2", "keys.read")]),
        ];

        let access = project_effective("u1", &mappings, &view);

        let occurrences = access
            .permissions
            .iter()
            .filter(|value| value.permission_id == "p1")
            .count();
        assert_eq!(occurrences, 1);
        assert_eq!(access.permissions.len(), 2);
        assert_eq!(access.roles.len(), 2);
    }

    #[test]
    fn unmapped_user_projects_empty_access() {
        let mappings = vec![mapping("u1", &["1"])];
        let view = vec![entry("1", "Admin", vec![permission("p1", "merchants.read")])];

        let access = project_effective("u2", &mappings, &view);

        assert!(access.permissions.is_empty());
        assert!(access.roles.is_empty());
    }

    #[test]
    fn roles_assigned_but_missing_from_view_are_skipped() {
        let mappings = vec![mapping("u1", &["1", "ghost"])];
        let view = vec![entry("1", "Admin", vec![permission("p1", "merchants.read")])];

        let access = project_effective("u1", &mappings, &view);

        assert_eq!(access.roles.len(), 1);
        assert_eq!(access.roles[0].role_id, "1");
    }

    #[test]
    fn predicates_answer_flat_membership_only() {
        let mappings = vec![mapping("u1", &["1"])];
        let view = vec![entry("1", "Admin", vec![permission("p1", "merchants.read")])];

        let access = project_effective("u1", &mappings, &view);

        assert!(!access.has_permission("merchants.write"));
        assert!(!access.has_role("Support"));
    }
}
