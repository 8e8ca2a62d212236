mod rbac;
mod session;

use serde::Serialize;
use ts_rs::TS;

pub use rbac::{
    CreatePermissionGroupRequest, CreatePermissionRequest, CreateRoleRequest,
    MappedUserRoleResponse, PermissionGroupResponse, PermissionGroupsResponse,
    PermissionResponse, PermissionSummaryResponse, PermissionsResponse, RoleResponse,
    RoleSummaryResponse, RoleWithPermissionsResponse, RolesResponse,
    UpdatePermissionGroupRequest, UpdatePermissionRequest, UpdateRoleRequest,
    UserRoleMappingsResponse, UserSummaryResponse,
};
pub use session::{SessionAccessResponse, SessionUserResponse, SetSessionUserRequest};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
