//! Single source of truth for the four independently fetched RBAC collections.

mod mutations;
#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use paydesk_domain::{
    MappedUserRole, Permission, PermissionGroup, Role, RoleWithPermissions, recompose,
};
use tokio::sync::{RwLock, watch};

/// Result of a targeted store mutation.
///
/// Mutations never fail; a mutation aimed at an unknown identifier reports
/// `NotFound` instead of silently dropping the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation matched an entry and was applied.
    Applied,
    /// No entry matched the target identifier; nothing changed.
    NotFound,
}

impl MutationOutcome {
    /// Returns whether the mutation was applied.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The independently loaded collections and feeds tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RbacCollection {
    /// The role collection.
    Roles,
    /// The permission collection.
    Permissions,
    /// The permission-group collection.
    PermissionGroups,
    /// The user-to-role mapping collection.
    MappedUserRoles,
    /// The role-permission mapping feed behind the composed view.
    RolePermissionMappings,
}

impl RbacCollection {
    /// Returns a stable transport value for this collection.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Permissions => "permissions",
            Self::PermissionGroups => "permission-groups",
            Self::MappedUserRoles => "user-roles",
            Self::RolePermissionMappings => "role-permission-mappings",
        }
    }
}

impl std::str::FromStr for RbacCollection {
    type Err = paydesk_core::AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "roles" => Ok(Self::Roles),
            "permissions" => Ok(Self::Permissions),
            "permission-groups" => Ok(Self::PermissionGroups),
            "user-roles" => Ok(Self::MappedUserRoles),
            "role-permission-mappings" => Ok(Self::RolePermissionMappings),
            _ => Err(paydesk_core::AppError::Validation(format!(
                "unknown collection '{value}'"
            ))),
        }
    }
}

/// Per-collection fetch state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStatus {
    /// Whether a fetch for this collection is in flight.
    pub loading: bool,
    /// Error recorded by the most recent failed fetch, if any.
    pub error: Option<String>,
    /// When the collection was last replaced wholesale.
    pub synced_at: Option<DateTime<Utc>>,
}

impl CollectionStatus {
    fn mark_synced(&mut self) {
        self.loading = false;
        self.error = None;
        self.synced_at = Some(Utc::now());
    }
}

#[derive(Debug)]
struct Collection<T> {
    items: Vec<T>,
    status: CollectionStatus,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: CollectionStatus::default(),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    roles: Collection<Role>,
    permissions: Collection<Permission>,
    permission_groups: Collection<PermissionGroup>,
    mapped_user_roles: Collection<MappedUserRole>,
    mapping_entries: Vec<RoleWithPermissions>,
    mapping_status: CollectionStatus,
    composed_cache: Option<Vec<RoleWithPermissions>>,
}

impl StoreState {
    fn compose(&self) -> Vec<RoleWithPermissions> {
        let mut view = recompose(&self.roles.items, &self.mapping_entries);

        for entry in &self.mapping_entries {
            let known = self
                .roles
                .items
                .iter()
                .any(|role| role.role_id == entry.role_id);
            if !known {
                view.push(entry.clone());
            }
        }

        view
    }
}

/// In-memory entity store for RBAC collections.
///
/// All components read the store immutably and write only through the defined
/// mutation operations. The composed roles-with-permissions view is derived on
/// read from the role collection and the retained mapping entries, memoized
/// until an affecting mutation invalidates it. Changes to the composed view and
/// the user-role mapping collection are published over watch channels.
#[derive(Debug)]
pub struct RbacStore {
    state: RwLock<StoreState>,
    view_tx: watch::Sender<Vec<RoleWithPermissions>>,
    mappings_tx: watch::Sender<Vec<MappedUserRole>>,
}

impl Default for RbacStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RbacStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (view_tx, _) = watch::channel(Vec::new());
        let (mappings_tx, _) = watch::channel(Vec::new());

        Self {
            state: RwLock::new(StoreState::default()),
            view_tx,
            mappings_tx,
        }
    }

    /// Returns a snapshot of the role collection.
    pub async fn roles(&self) -> Vec<Role> {
        self.state.read().await.roles.items.clone()
    }

    /// Returns a snapshot of the permission collection.
    pub async fn permissions(&self) -> Vec<Permission> {
        self.state.read().await.permissions.items.clone()
    }

    /// Returns a snapshot of the permission-group collection.
    pub async fn permission_groups(&self) -> Vec<PermissionGroup> {
        self.state.read().await.permission_groups.items.clone()
    }

    /// Returns a snapshot of the user-role mapping collection.
    pub async fn mapped_user_roles(&self) -> Vec<MappedUserRole> {
        self.state.read().await.mapped_user_roles.items.clone()
    }

    /// Returns the fetch status for one collection.
    pub async fn status(&self, collection: RbacCollection) -> CollectionStatus {
        let state = self.state.read().await;
        match collection {
            RbacCollection::Roles => state.roles.status.clone(),
            RbacCollection::Permissions => state.permissions.status.clone(),
            RbacCollection::PermissionGroups => state.permission_groups.status.clone(),
            RbacCollection::MappedUserRoles => state.mapped_user_roles.status.clone(),
            RbacCollection::RolePermissionMappings => state.mapping_status.clone(),
        }
    }

    /// Returns the composed roles-with-permissions view, computing it if the
    /// memoized value was invalidated.
    pub async fn roles_with_permissions(&self) -> Vec<RoleWithPermissions> {
        if let Some(view) = self.state.read().await.composed_cache.clone() {
            return view;
        }

        let mut state = self.state.write().await;
        let view = state.compose();
        state.composed_cache = Some(view.clone());
        view
    }

    /// Subscribes to composed-view changes.
    #[must_use]
    pub fn subscribe_roles_with_permissions(&self) -> watch::Receiver<Vec<RoleWithPermissions>> {
        self.view_tx.subscribe()
    }

    /// Subscribes to user-role mapping collection changes.
    #[must_use]
    pub fn subscribe_mapped_user_roles(&self) -> watch::Receiver<Vec<MappedUserRole>> {
        self.mappings_tx.subscribe()
    }

    fn publish_view(&self, state: &mut StoreState) {
        let view = state.compose();
        state.composed_cache = Some(view.clone());
        self.view_tx.send_replace(view);
    }

    fn publish_mappings(&self, state: &StoreState) {
        self.mappings_tx
            .send_replace(state.mapped_user_roles.items.clone());
    }
}
