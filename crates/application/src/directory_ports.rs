use async_trait::async_trait;
use paydesk_core::AppResult;
use paydesk_domain::{MappedUserRole, Permission, PermissionGroup, Role, RoleWithPermissions};

/// Client port for the gateway's REST directory, the upstream source of truth
/// for every RBAC collection.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetches the role collection.
    async fn fetch_roles(&self) -> AppResult<Vec<Role>>;

    /// Fetches the permission collection.
    async fn fetch_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Fetches the permission-group collection.
    async fn fetch_permission_groups(&self) -> AppResult<Vec<PermissionGroup>>;

    /// Fetches the user-to-role mapping collection.
    async fn fetch_mapped_user_roles(&self) -> AppResult<Vec<MappedUserRole>>;

    /// Fetches role-permission mappings, grouped per role.
    ///
    /// A response may describe only a subset of roles; callers merge it into
    /// existing state rather than replacing wholesale.
    async fn fetch_role_permission_mappings(&self) -> AppResult<Vec<RoleWithPermissions>>;
}
