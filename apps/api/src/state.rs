use std::sync::Arc;

use paydesk_application::{RbacStore, RbacSyncService, SessionAccess};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Entity store holding the RBAC collections and the composed view.
    pub store: Arc<RbacStore>,
    /// Refresh orchestration against the upstream directory.
    pub sync_service: RbacSyncService,
    /// Session state carrying the published effective access.
    pub session: Arc<SessionAccess>,
}
