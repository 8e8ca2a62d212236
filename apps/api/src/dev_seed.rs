//! Development dataset for the in-memory directory.

use paydesk_domain::{
    MappedUserRole, Permission, PermissionAction, PermissionGroup, PermissionSummary, Role,
    RoleSummary, RoleWithPermissions, UserSummary,
};
use paydesk_infrastructure::InMemoryDirectory;

/// Loads a small payment-gateway operator dataset into the directory.
pub async fn seed_directory(directory: &InMemoryDirectory) {
    directory.set_permission_groups(permission_groups()).await;
    directory.set_permissions(permissions()).await;
    directory.set_roles(roles()).await;
    directory
        .set_role_permission_mappings(role_permission_mappings())
        .await;
    directory.set_mapped_user_roles(mapped_user_roles()).await;
}

fn permission_groups() -> Vec<PermissionGroup> {
    vec![
        group("pg-merchants", "Merchants", "Merchant onboarding and profiles"),
        group("pg-payments", "Payments", "Payment and refund operations"),
        group("pg-webhooks", "Webhooks", "Webhook endpoint management"),
        group("pg-security", "Security", "API keys and access administration"),
    ]
}

fn group(group_id: &str, name: &str, description: &str) -> PermissionGroup {
    PermissionGroup {
        group_id: group_id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        is_active: true,
    }
}

fn permissions() -> Vec<Permission> {
    vec![
        permission(
            "perm-merchants-read",
            "merchants.read",
            PermissionAction::Read,
            Some("pg-merchants"),
            "/console/merchants",
        ),
        permission(
            "perm-merchants-manage",
            "merchants.manage",
            PermissionAction::Manage,
            Some("pg-merchants"),
            "/console/merchants",
        ),
        permission(
            "perm-payments-read",
            "payments.read",
            PermissionAction::Read,
            Some("pg-payments"),
            "/console/payments",
        ),
        permission(
            "perm-refunds-create",
            "refunds.create",
            PermissionAction::Create,
            Some("pg-payments"),
            "/console/payments/refunds",
        ),
        permission(
            "perm-webhooks-manage",
            "webhooks.manage",
            PermissionAction::Manage,
            Some("pg-webhooks"),
            "/console/webhooks",
        ),
        permission(
            "perm-api-keys-manage",
            "api-keys.manage",
            PermissionAction::Manage,
            Some("pg-security"),
            "/console/api-keys",
        ),
        permission(
            "perm-rbac-manage",
            "rbac.manage",
            PermissionAction::Manage,
            Some("pg-security"),
            "/console/access",
        ),
    ]
}

fn permission(
    permission_id: &str,
    name: &str,
    action: PermissionAction,
    group_id: Option<&str>,
    route: &str,
) -> Permission {
    Permission {
        permission_id: permission_id.to_owned(),
        name: name.to_owned(),
        description: String::new(),
        action,
        group_id: group_id.map(str::to_owned),
        route: route.to_owned(),
        is_active: true,
    }
}

fn roles() -> Vec<Role> {
    vec![
        role(
            "role-gateway-admin",
            "Gateway Admin",
            "Full administrative access to the gateway console",
        ),
        role(
            "role-merchant-ops",
            "Merchant Operations",
            "Day-to-day merchant and payment handling",
        ),
        role(
            "role-support-viewer",
            "Support Viewer",
            "Read-only access for support staff",
        ),
    ]
}

fn role(role_id: &str, name: &str, description: &str) -> Role {
    Role {
        role_id: role_id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        is_active: true,
    }
}

fn role_permission_mappings() -> Vec<RoleWithPermissions> {
    let all = permissions();
    let grants = |names: &[&str]| -> Vec<PermissionSummary> {
        all.iter()
            .filter(|permission| names.contains(&permission.name.as_str()))
            .map(PermissionSummary::from_permission)
            .collect()
    };

    vec![
        RoleWithPermissions {
            role_id: "role-gateway-admin".to_owned(),
            name: "Gateway Admin".to_owned(),
            description: String::new(),
            is_active: true,
            permissions: grants(&[
                "merchants.read",
                "merchants.manage",
                "payments.read",
                "refunds.create",
                "webhooks.manage",
                "api-keys.manage",
                "rbac.manage",
            ]),
        },
        RoleWithPermissions {
            role_id: "role-merchant-ops".to_owned(),
            name: "Merchant Operations".to_owned(),
            description: String::new(),
            is_active: true,
            permissions: grants(&[
                "merchants.read",
                "merchants.manage",
                "payments.read",
                "refunds.create",
            ]),
        },
        RoleWithPermissions {
            role_id: "role-support-viewer".to_owned(),
            name: "Support Viewer".to_owned(),
            description: String::new(),
            is_active: true,
            permissions: grants(&["merchants.read", "payments.read"]),
        },
    ]
}

fn mapped_user_roles() -> Vec<MappedUserRole> {
    vec![
        MappedUserRole {
            user: UserSummary {
                user_id: "user-admin".to_owned(),
                first_name: "Priya".to_owned(),
                last_name: "Raman".to_owned(),
                email: "priya.raman@gateway.example".to_owned(),
            },
            roles: vec![RoleSummary {
                role_id: "role-gateway-admin".to_owned(),
                name: "Gateway Admin".to_owned(),
            }],
        },
        MappedUserRole {
            user: UserSummary {
                user_id: "user-ops".to_owned(),
                first_name: "Marco".to_owned(),
                last_name: "Deluca".to_owned(),
                email: "marco.deluca@gateway.example".to_owned(),
            },
            roles: vec![
                RoleSummary {
                    role_id: "role-merchant-ops".to_owned(),
                    name: "Merchant Operations".to_owned(),
                },
                RoleSummary {
                    role_id: "role-support-viewer".to_owned(),
                    name: "Support Viewer".to_owned(),
                },
            ],
        },
        MappedUserRole {
            user: UserSummary {
                user_id: "user-support".to_owned(),
                first_name: "Lena".to_owned(),
                last_name: "Kowalski".to_owned(),
                email: "lena.kowalski@gateway.example".to_owned(),
            },
            roles: vec![RoleSummary {
                role_id: "role-support-viewer".to_owned(),
                name: "Support Viewer".to_owned(),
            }],
        },
    ]
}
