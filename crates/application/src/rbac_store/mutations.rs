use super::*;

use paydesk_domain::{
    PermissionGroupUpdate, PermissionUpdate, RoleUpdate, merge_mapping_batch,
};

impl RbacStore {
    /// Replaces the role collection wholesale and recomposes the derived view.
    pub async fn set_roles(&self, roles: Vec<Role>) {
        let mut state = self.state.write().await;
        state.roles.items = roles;
        state.roles.status.mark_synced();
        self.publish_view(&mut state);
    }

    /// Replaces the permission collection wholesale.
    pub async fn set_permissions(&self, permissions: Vec<Permission>) {
        let mut state = self.state.write().await;
        state.permissions.items = permissions;
        state.permissions.status.mark_synced();
    }

    /// Replaces the permission-group collection wholesale.
    pub async fn set_permission_groups(&self, groups: Vec<PermissionGroup>) {
        let mut state = self.state.write().await;
        state.permission_groups.items = groups;
        state.permission_groups.status.mark_synced();
    }

    /// Replaces the user-role mapping collection wholesale.
    pub async fn set_mapped_user_roles(&self, mappings: Vec<MappedUserRole>) {
        let mut state = self.state.write().await;
        state.mapped_user_roles.items = mappings;
        state.mapped_user_roles.status.mark_synced();
        self.publish_mappings(&state);
    }

    /// Merges an incoming role-permission mapping batch into the retained
    /// mapping entries. Entries absent from the batch are preserved.
    pub async fn merge_role_permission_mappings(&self, batch: Vec<RoleWithPermissions>) {
        let mut state = self.state.write().await;
        state.mapping_entries = merge_mapping_batch(&state.mapping_entries, batch);
        state.mapping_status.mark_synced();
        self.publish_view(&mut state);
    }

    /// Sets the loading flag for one collection.
    pub async fn set_loading(&self, collection: RbacCollection, loading: bool) {
        let mut state = self.state.write().await;
        self.status_mut(&mut state, collection).loading = loading;
    }

    /// Records or clears the error slot for one collection.
    pub async fn set_error(&self, collection: RbacCollection, error: Option<String>) {
        let mut state = self.state.write().await;
        self.status_mut(&mut state, collection).error = error;
    }

    /// Inserts a role, replacing any existing role with the same identifier.
    pub async fn add_role(&self, role: Role) {
        let mut state = self.state.write().await;
        match state
            .roles
            .items
            .iter_mut()
            .find(|existing| existing.role_id == role.role_id)
        {
            Some(existing) => *existing = role,
            None => state.roles.items.push(role),
        }
        self.publish_view(&mut state);
    }

    /// Merges a partial update into the matching role.
    pub async fn update_role(&self, role_id: &str, update: RoleUpdate) -> MutationOutcome {
        let mut state = self.state.write().await;
        let Some(role) = state
            .roles
            .items
            .iter_mut()
            .find(|existing| existing.role_id == role_id)
        else {
            return MutationOutcome::NotFound;
        };

        if let Some(name) = update.name {
            role.name = name;
        }
        if let Some(description) = update.description {
            role.description = description;
        }
        if let Some(is_active) = update.is_active {
            role.is_active = is_active;
        }

        self.publish_view(&mut state);
        MutationOutcome::Applied
    }

    /// Removes a role, along with its composed entry and mapping state.
    pub async fn delete_role(&self, role_id: &str) -> MutationOutcome {
        let mut state = self.state.write().await;
        let before = state.roles.items.len();
        state.roles.items.retain(|role| role.role_id != role_id);

        if state.roles.items.len() == before {
            return MutationOutcome::NotFound;
        }

        state.mapping_entries.retain(|entry| entry.role_id != role_id);
        self.publish_view(&mut state);
        MutationOutcome::Applied
    }

    /// Inserts a permission, replacing any existing permission with the same
    /// identifier.
    pub async fn add_permission(&self, permission: Permission) {
        let mut state = self.state.write().await;
        match state
            .permissions
            .items
            .iter_mut()
            .find(|existing| existing.permission_id == permission.permission_id)
        {
            Some(existing) => *existing = permission,
            None => state.permissions.items.push(permission),
        }
    }

    /// Merges a partial update into the matching permission.
    pub async fn update_permission(
        &self,
        permission_id: &str,
        update: PermissionUpdate,
    ) -> MutationOutcome {
        let mut state = self.state.write().await;
        let Some(permission) = state
            .permissions
            .items
            .iter_mut()
            .find(|existing| existing.permission_id == permission_id)
        else {
            return MutationOutcome::NotFound;
        };

        if let Some(name) = update.name {
            permission.name = name;
        }
        if let Some(description) = update.description {
            permission.description = description;
        }
        if let Some(action) = update.action {
            permission.action = action;
        }
        if let Some(group_id) = update.group_id {
            permission.group_id = group_id;
        }
        if let Some(route) = update.route {
            permission.route = route;
        }
        if let Some(is_active) = update.is_active {
            permission.is_active = is_active;
        }

        MutationOutcome::Applied
    }

    /// Removes a permission and cascades the removal into every composed
    /// entry's permission list.
    pub async fn delete_permission(&self, permission_id: &str) -> MutationOutcome {
        let mut state = self.state.write().await;
        let before = state.permissions.items.len();
        state
            .permissions
            .items
            .retain(|permission| permission.permission_id != permission_id);
        let found = state.permissions.items.len() != before;

        for entry in &mut state.mapping_entries {
            entry
                .permissions
                .retain(|permission| permission.permission_id != permission_id);
        }
        self.publish_view(&mut state);

        if found {
            MutationOutcome::Applied
        } else {
            MutationOutcome::NotFound
        }
    }

    /// Inserts a permission group, replacing any existing group with the same
    /// identifier.
    pub async fn add_permission_group(&self, group: PermissionGroup) {
        let mut state = self.state.write().await;
        match state
            .permission_groups
            .items
            .iter_mut()
            .find(|existing| existing.group_id == group.group_id)
        {
            Some(existing) => *existing = group,
            None => state.permission_groups.items.push(group),
        }
    }

    /// Merges a partial update into the matching permission group.
    pub async fn update_permission_group(
        &self,
        group_id: &str,
        update: PermissionGroupUpdate,
    ) -> MutationOutcome {
        let mut state = self.state.write().await;
        let Some(group) = state
            .permission_groups
            .items
            .iter_mut()
            .find(|existing| existing.group_id == group_id)
        else {
            return MutationOutcome::NotFound;
        };

        if let Some(name) = update.name {
            group.name = name;
        }
        if let Some(description) = update.description {
            group.description = description;
        }
        if let Some(is_active) = update.is_active {
            group.is_active = is_active;
        }

        MutationOutcome::Applied
    }

    /// Removes a permission group and clears the group reference on
    /// permissions that pointed at it. Groups are cosmetic, so no permission
    /// is deleted.
    pub async fn delete_permission_group(&self, group_id: &str) -> MutationOutcome {
        let mut state = self.state.write().await;
        let before = state.permission_groups.items.len();
        state
            .permission_groups
            .items
            .retain(|group| group.group_id != group_id);

        if state.permission_groups.items.len() == before {
            return MutationOutcome::NotFound;
        }

        for permission in &mut state.permissions.items {
            if permission.group_id.as_deref() == Some(group_id) {
                permission.group_id = None;
            }
        }

        MutationOutcome::Applied
    }

    fn status_mut<'state>(
        &self,
        state: &'state mut StoreState,
        collection: RbacCollection,
    ) -> &'state mut CollectionStatus {
        match collection {
            RbacCollection::Roles => &mut state.roles.status,
            RbacCollection::Permissions => &mut state.permissions.status,
            RbacCollection::PermissionGroups => &mut state.permission_groups.status,
            RbacCollection::MappedUserRoles => &mut state.mapped_user_roles.status,
            RbacCollection::RolePermissionMappings => &mut state.mapping_status,
        }
    }
}
