use paydesk_application::CollectionStatus;
use paydesk_domain::{
    MappedUserRole, Permission, PermissionGroup, PermissionSummary, Role, RoleSummary,
    RoleWithPermissions, UserSummary,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub role_id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            role_id: value.role_id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

/// Role collection snapshot with fetch status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/roles-response.ts"
)]
pub struct RolesResponse {
    pub items: Vec<RoleResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub synced_at: Option<String>,
}

impl RolesResponse {
    /// Builds a snapshot from store items and status.
    pub fn from_parts(items: Vec<Role>, status: CollectionStatus) -> Self {
        Self {
            items: items.into_iter().map(RoleResponse::from).collect(),
            loading: status.loading,
            error: status.error,
            synced_at: status.synced_at.map(|value| value.to_rfc3339()),
        }
    }
}

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Incoming payload for role updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// API representation of a permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub permission_id: String,
    pub name: String,
    pub description: String,
    pub action: String,
    pub group_id: Option<String>,
    pub route: String,
    pub is_active: bool,
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission_id: value.permission_id,
            name: value.name,
            description: value.description,
            action: value.action.as_str().to_owned(),
            group_id: value.group_id,
            route: value.route,
            is_active: value.is_active,
        }
    }
}

/// Permission collection snapshot with fetch status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/permissions-response.ts"
)]
pub struct PermissionsResponse {
    pub items: Vec<PermissionResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub synced_at: Option<String>,
}

impl PermissionsResponse {
    /// Builds a snapshot from store items and status.
    pub fn from_parts(items: Vec<Permission>, status: CollectionStatus) -> Self {
        Self {
            items: items.into_iter().map(PermissionResponse::from).collect(),
            loading: status.loading,
            error: status.error,
            synced_at: status.synced_at.map(|value| value.to_rfc3339()),
        }
    }
}

/// Incoming payload for permission creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/create-permission-request.ts"
)]
pub struct CreatePermissionRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub action: String,
    pub group_id: Option<String>,
    pub route: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Incoming payload for permission updates.
///
/// `group_id` distinguishes "leave unchanged" (absent) from "clear the group"
/// (explicit null).
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/update-permission-request.ts"
)]
pub struct UpdatePermissionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub action: Option<String>,
    #[serde(default, deserialize_with = "deserialize_group_patch")]
    #[ts(optional, type = "string | null")]
    pub group_id: Option<Option<String>>,
    pub route: Option<String>,
    pub is_active: Option<bool>,
}

/// API representation of a permission group.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/permission-group-response.ts"
)]
pub struct PermissionGroupResponse {
    pub group_id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<PermissionGroup> for PermissionGroupResponse {
    fn from(value: PermissionGroup) -> Self {
        Self {
            group_id: value.group_id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

/// Permission-group collection snapshot with fetch status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/permission-groups-response.ts"
)]
pub struct PermissionGroupsResponse {
    pub items: Vec<PermissionGroupResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub synced_at: Option<String>,
}

impl PermissionGroupsResponse {
    /// Builds a snapshot from store items and status.
    pub fn from_parts(items: Vec<PermissionGroup>, status: CollectionStatus) -> Self {
        Self {
            items: items
                .into_iter()
                .map(PermissionGroupResponse::from)
                .collect(),
            loading: status.loading,
            error: status.error,
            synced_at: status.synced_at.map(|value| value.to_rfc3339()),
        }
    }
}

/// Incoming payload for permission-group creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/create-permission-group-request.ts"
)]
pub struct CreatePermissionGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Incoming payload for permission-group updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/update-permission-group-request.ts"
)]
pub struct UpdatePermissionGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// API representation of a permission carried inside the composed view.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/permission-summary-response.ts"
)]
pub struct PermissionSummaryResponse {
    pub permission_id: String,
    pub name: String,
    pub route: String,
    pub action: String,
    pub is_active: bool,
}

impl From<PermissionSummary> for PermissionSummaryResponse {
    fn from(value: PermissionSummary) -> Self {
        Self {
            permission_id: value.permission_id,
            name: value.name,
            route: value.route,
            action: value.action.as_str().to_owned(),
            is_active: value.is_active,
        }
    }
}

/// API representation of one composed roles-with-permissions entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/role-with-permissions-response.ts"
)]
pub struct RoleWithPermissionsResponse {
    pub role_id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub permissions: Vec<PermissionSummaryResponse>,
}

impl From<RoleWithPermissions> for RoleWithPermissionsResponse {
    fn from(value: RoleWithPermissions) -> Self {
        Self {
            role_id: value.role_id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
            permissions: value
                .permissions
                .into_iter()
                .map(PermissionSummaryResponse::from)
                .collect(),
        }
    }
}

/// API representation of a role summary.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/role-summary-response.ts"
)]
pub struct RoleSummaryResponse {
    pub role_id: String,
    pub name: String,
}

impl From<RoleSummary> for RoleSummaryResponse {
    fn from(value: RoleSummary) -> Self {
        Self {
            role_id: value.role_id,
            name: value.name,
        }
    }
}

/// API representation of a mapped user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/user-summary-response.ts"
)]
pub struct UserSummaryResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(value: UserSummary) -> Self {
        Self {
            user_id: value.user_id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

/// API representation of one user-role mapping.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/mapped-user-role-response.ts"
)]
pub struct MappedUserRoleResponse {
    pub user: UserSummaryResponse,
    pub roles: Vec<RoleSummaryResponse>,
}

impl From<MappedUserRole> for MappedUserRoleResponse {
    fn from(value: MappedUserRole) -> Self {
        Self {
            user: UserSummaryResponse::from(value.user),
            roles: value.roles.into_iter().map(RoleSummaryResponse::from).collect(),
        }
    }
}

/// User-role mapping collection snapshot with fetch status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/user-role-mappings-response.ts"
)]
pub struct UserRoleMappingsResponse {
    pub items: Vec<MappedUserRoleResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub synced_at: Option<String>,
}

impl UserRoleMappingsResponse {
    /// Builds a snapshot from store items and status.
    pub fn from_parts(items: Vec<MappedUserRole>, status: CollectionStatus) -> Self {
        Self {
            items: items.into_iter().map(MappedUserRoleResponse::from).collect(),
            loading: status.loading,
            error: status.error,
            synced_at: status.synced_at.map(|value| value.to_rfc3339()),
        }
    }
}

fn default_true() -> bool {
    true
}

/// An absent `group_id` field leaves the group unchanged; an explicit null
/// clears it.
fn deserialize_group_patch<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
