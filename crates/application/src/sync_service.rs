//! Fetch orchestration between the directory client and the entity store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::directory_ports::DirectoryClient;
use crate::rbac_store::{RbacCollection, RbacStore};

/// Loads RBAC collections from the directory into the entity store.
///
/// Each refresh sets the collection's loading flag, performs exactly one fetch,
/// and either replaces the collection or records the failure in the
/// collection's error slot, leaving the data at its last-known-good state.
/// There is no retry; a failed refresh is re-triggered externally.
#[derive(Clone)]
pub struct RbacSyncService {
    store: Arc<RbacStore>,
    directory: Arc<dyn DirectoryClient>,
}

impl RbacSyncService {
    /// Creates a sync service over a store and a directory client.
    #[must_use]
    pub fn new(store: Arc<RbacStore>, directory: Arc<dyn DirectoryClient>) -> Self {
        Self { store, directory }
    }

    /// Refreshes one collection from the directory.
    pub async fn refresh(&self, collection: RbacCollection) {
        self.store.set_loading(collection, true).await;

        let result = match collection {
            RbacCollection::Roles => match self.directory.fetch_roles().await {
                Ok(roles) => {
                    let count = roles.len();
                    self.store.set_roles(roles).await;
                    Ok(count)
                }
                Err(error) => Err(error),
            },
            RbacCollection::Permissions => match self.directory.fetch_permissions().await {
                Ok(permissions) => {
                    let count = permissions.len();
                    self.store.set_permissions(permissions).await;
                    Ok(count)
                }
                Err(error) => Err(error),
            },
            RbacCollection::PermissionGroups => {
                match self.directory.fetch_permission_groups().await {
                    Ok(groups) => {
                        let count = groups.len();
                        self.store.set_permission_groups(groups).await;
                        Ok(count)
                    }
                    Err(error) => Err(error),
                }
            }
            RbacCollection::MappedUserRoles => {
                match self.directory.fetch_mapped_user_roles().await {
                    Ok(mappings) => {
                        let count = mappings.len();
                        self.store.set_mapped_user_roles(mappings).await;
                        Ok(count)
                    }
                    Err(error) => Err(error),
                }
            }
            RbacCollection::RolePermissionMappings => {
                match self.directory.fetch_role_permission_mappings().await {
                    Ok(batch) => {
                        let count = batch.len();
                        self.store.merge_role_permission_mappings(batch).await;
                        Ok(count)
                    }
                    Err(error) => Err(error),
                }
            }
        };

        match result {
            Ok(count) => {
                info!(collection = collection.as_str(), count, "collection refreshed");
            }
            Err(error) => {
                warn!(
                    collection = collection.as_str(),
                    error = %error,
                    "collection refresh failed"
                );
                self.store.set_loading(collection, false).await;
                self.store
                    .set_error(collection, Some(error.to_string()))
                    .await;
            }
        }
    }

    /// Refreshes every collection once, in dependency order.
    pub async fn refresh_all(&self) {
        for collection in [
            RbacCollection::Roles,
            RbacCollection::Permissions,
            RbacCollection::PermissionGroups,
            RbacCollection::MappedUserRoles,
            RbacCollection::RolePermissionMappings,
        ] {
            self.refresh(collection).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use paydesk_core::{AppError, AppResult};
    use paydesk_domain::{
        MappedUserRole, Permission, PermissionGroup, Role, RoleWithPermissions,
    };

    use crate::rbac_store::{RbacCollection, RbacStore};

    use super::{DirectoryClient, RbacSyncService};

    #[derive(Default)]
    struct FakeDirectory {
        roles: Vec<Role>,
        fail_roles: AtomicBool,
    }

    #[async_trait]
    impl DirectoryClient for FakeDirectory {
        async fn fetch_roles(&self) -> AppResult<Vec<Role>> {
            if self.fail_roles.load(Ordering::SeqCst) {
                return Err(AppError::Internal(
                    "directory returned status 503".to_owned(),
                ));
            }
            Ok(self.roles.clone())
        }

        async fn fetch_permissions(&self) -> AppResult<Vec<Permission>> {
            Ok(Vec::new())
        }

        async fn fetch_permission_groups(&self) -> AppResult<Vec<PermissionGroup>> {
            Ok(Vec::new())
        }

        async fn fetch_mapped_user_roles(&self) -> AppResult<Vec<MappedUserRole>> {
            Ok(Vec::new())
        }

        async fn fetch_role_permission_mappings(&self) -> AppResult<Vec<RoleWithPermissions>> {
            Ok(Vec::new())
        }
    }

    fn sample_role() -> Role {
        Role {
            role_id: "1".to_owned(),
            name: "Admin".to_owned(),
            description: "gateway administrator".to_owned(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn successful_refresh_replaces_collection_and_clears_status() {
        let store = Arc::new(RbacStore::new());
        let directory = Arc::new(FakeDirectory {
            roles: vec![sample_role()],
            ..FakeDirectory::default()
        });
        let service = RbacSyncService::new(store.clone(), directory);

        service.refresh(RbacCollection::Roles).await;

        assert_eq!(store.roles().await.len(), 1);
        let status = store.status(RbacCollection::Roles).await;
        assert!(!status.loading);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn failed_refresh_records_error_and_keeps_last_known_good() {
        let store = Arc::new(RbacStore::new());
        let directory = Arc::new(FakeDirectory {
            roles: vec![sample_role()],
            ..FakeDirectory::default()
        });
        let service = RbacSyncService::new(store.clone(), directory.clone());

        service.refresh(RbacCollection::Roles).await;
        directory.fail_roles.store(true, Ordering::SeqCst);
        service.refresh(RbacCollection::Roles).await;

        let status = store.status(RbacCollection::Roles).await;
        assert!(!status.loading);
        assert!(
            status
                .error
                .is_some_and(|message| message.contains("503"))
        );
        assert_eq!(store.roles().await.len(), 1);
        assert_eq!(store.roles_with_permissions().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_does_not_touch_other_collections() {
        let store = Arc::new(RbacStore::new());
        let directory = Arc::new(FakeDirectory::default());
        directory.fail_roles.store(true, Ordering::SeqCst);
        let service = RbacSyncService::new(store.clone(), directory);

        service.refresh_all().await;

        assert!(store.status(RbacCollection::Roles).await.error.is_some());
        assert!(
            store
                .status(RbacCollection::Permissions)
                .await
                .error
                .is_none()
        );
    }
}
