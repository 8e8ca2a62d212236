//! Session-scoped publication of each user's effective access.

use std::sync::Arc;

use paydesk_core::SessionUser;
use paydesk_domain::{EffectiveAccess, project_effective};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::rbac_store::RbacStore;

/// Auth/session state holding the current user and their published access.
#[derive(Debug)]
pub struct SessionAccess {
    user_tx: watch::Sender<Option<SessionUser>>,
    access_tx: watch::Sender<EffectiveAccess>,
}

impl Default for SessionAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAccess {
    /// Creates session state with no authenticated user and empty access.
    #[must_use]
    pub fn new() -> Self {
        let (user_tx, _) = watch::channel(None);
        let (access_tx, _) = watch::channel(EffectiveAccess::default());

        Self { user_tx, access_tx }
    }

    /// Records the authenticated user.
    pub fn set_user(&self, user: SessionUser) {
        self.user_tx.send_replace(Some(user));
    }

    /// Clears the authenticated user, e.g. at logout.
    pub fn clear_user(&self) {
        self.user_tx.send_replace(None);
    }

    /// Returns the current authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.user_tx.borrow().clone()
    }

    /// Returns the most recently published effective access.
    #[must_use]
    pub fn access(&self) -> EffectiveAccess {
        self.access_tx.borrow().clone()
    }

    /// Returns whether the published access grants a permission with this name.
    #[must_use]
    pub fn has_permission(&self, name: &str) -> bool {
        self.access_tx.borrow().has_permission(name)
    }

    /// Returns whether the published access includes a role with this name.
    #[must_use]
    pub fn has_role(&self, name: &str) -> bool {
        self.access_tx.borrow().has_role(name)
    }

    /// Subscribes to current-user changes.
    #[must_use]
    pub fn subscribe_user(&self) -> watch::Receiver<Option<SessionUser>> {
        self.user_tx.subscribe()
    }

    /// Subscribes to published-access changes.
    #[must_use]
    pub fn subscribe_access(&self) -> watch::Receiver<EffectiveAccess> {
        self.access_tx.subscribe()
    }

    fn publish(&self, access: EffectiveAccess) {
        self.access_tx.send_replace(access);
    }
}

/// Recomputes and republishes effective access whenever an input changes.
#[derive(Debug)]
pub struct AccessProjector;

impl AccessProjector {
    /// Spawns the projection task.
    ///
    /// The task subscribes to exactly three inputs: the current user, the
    /// user-role mapping collection, and the composed roles-with-permissions
    /// view. On any change it recomputes the projection synchronously and
    /// publishes the result into the session. An absent user publishes the
    /// empty projection; that is normal operation, not an error.
    pub fn spawn(store: &RbacStore, session: Arc<SessionAccess>) -> JoinHandle<()> {
        let mut user_rx = session.subscribe_user();
        let mut mappings_rx = store.subscribe_mapped_user_roles();
        let mut view_rx = store.subscribe_roles_with_permissions();

        tokio::spawn(async move {
            loop {
                let access = {
                    let user = user_rx.borrow_and_update().clone();
                    let mappings = mappings_rx.borrow_and_update().clone();
                    let view = view_rx.borrow_and_update().clone();

                    match user {
                        Some(user) => project_effective(user.user_id(), &mappings, &view),
                        None => EffectiveAccess::default(),
                    }
                };

                debug!(
                    permissions = access.permissions.len(),
                    roles = access.roles.len(),
                    "effective access republished"
                );
                session.publish(access);

                tokio::select! {
                    changed = user_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = mappings_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = view_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        })
    }
}
