//! RBAC domain entities and invariants.

#![forbid(unsafe_code)]

mod composition;
mod projection;
mod rbac;

pub use composition::{merge_mapping_batch, recompose};
pub use projection::{EffectiveAccess, project_effective};
pub use rbac::{
    MappedUserRole, Permission, PermissionAction, PermissionGroup, PermissionGroupUpdate,
    PermissionSummary, PermissionUpdate, Role, RoleSummary, RoleUpdate, RoleWithPermissions,
    UserSummary,
};
