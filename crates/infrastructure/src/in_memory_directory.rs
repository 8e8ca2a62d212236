use async_trait::async_trait;
use paydesk_application::DirectoryClient;
use paydesk_core::AppResult;
use paydesk_domain::{MappedUserRole, Permission, PermissionGroup, Role, RoleWithPermissions};
use tokio::sync::RwLock;

/// In-memory directory implementation used for development seeding and tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    roles: RwLock<Vec<Role>>,
    permissions: RwLock<Vec<Permission>>,
    permission_groups: RwLock<Vec<PermissionGroup>>,
    mapped_user_roles: RwLock<Vec<MappedUserRole>>,
    role_permission_mappings: RwLock<Vec<RoleWithPermissions>>,
}

impl InMemoryDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored role collection.
    pub async fn set_roles(&self, roles: Vec<Role>) {
        *self.roles.write().await = roles;
    }

    /// Replaces the stored permission collection.
    pub async fn set_permissions(&self, permissions: Vec<Permission>) {
        *self.permissions.write().await = permissions;
    }

    /// Replaces the stored permission-group collection.
    pub async fn set_permission_groups(&self, groups: Vec<PermissionGroup>) {
        *self.permission_groups.write().await = groups;
    }

    /// Replaces the stored user-role mapping collection.
    pub async fn set_mapped_user_roles(&self, mappings: Vec<MappedUserRole>) {
        *self.mapped_user_roles.write().await = mappings;
    }

    /// Replaces the stored role-permission mapping entries.
    pub async fn set_role_permission_mappings(&self, mappings: Vec<RoleWithPermissions>) {
        *self.role_permission_mappings.write().await = mappings;
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn fetch_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.read().await.clone())
    }

    async fn fetch_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.permissions.read().await.clone())
    }

    async fn fetch_permission_groups(&self) -> AppResult<Vec<PermissionGroup>> {
        Ok(self.permission_groups.read().await.clone())
    }

    async fn fetch_mapped_user_roles(&self) -> AppResult<Vec<MappedUserRole>> {
        Ok(self.mapped_user_roles.read().await.clone())
    }

    async fn fetch_role_permission_mappings(&self) -> AppResult<Vec<RoleWithPermissions>> {
        Ok(self.role_permission_mappings.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use paydesk_application::DirectoryClient;
    use paydesk_domain::Role;

    use super::InMemoryDirectory;

    #[tokio::test]
    async fn stored_collections_are_returned_by_fetch() {
        let directory = InMemoryDirectory::new();
        directory
            .set_roles(vec![Role {
                role_id: "1".to_owned(),
                name: "Admin".to_owned(),
                description: String::new(),
                is_active: true,
            }])
            .await;

        let roles = directory.fetch_roles().await;
        assert!(roles.is_ok_and(|roles| roles.len() == 1));

        let mappings = directory.fetch_role_permission_mappings().await;
        assert!(mappings.is_ok_and(|mappings| mappings.is_empty()));
    }
}
