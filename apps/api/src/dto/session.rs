use paydesk_core::SessionUser;
use paydesk_domain::EffectiveAccess;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{PermissionSummaryResponse, RoleSummaryResponse};

/// Incoming payload recording the authenticated user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/set-session-user-request.ts"
)]
pub struct SetSessionUserRequest {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
}

/// API representation of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/session-user-response.ts"
)]
pub struct SessionUserResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
}

impl From<SessionUser> for SessionUserResponse {
    fn from(value: SessionUser) -> Self {
        Self {
            user_id: value.user_id().to_owned(),
            display_name: value.display_name().to_owned(),
            email: value.email().map(str::to_owned),
        }
    }
}

/// Published effective access for the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/console-types/src/generated/session-access-response.ts"
)]
pub struct SessionAccessResponse {
    pub user: Option<SessionUserResponse>,
    pub permissions: Vec<PermissionSummaryResponse>,
    pub roles: Vec<RoleSummaryResponse>,
}

impl SessionAccessResponse {
    /// Builds the response from session state and the published projection.
    pub fn from_parts(user: Option<SessionUser>, access: EffectiveAccess) -> Self {
        Self {
            user: user.map(SessionUserResponse::from),
            permissions: access
                .permissions
                .into_iter()
                .map(PermissionSummaryResponse::from)
                .collect(),
            roles: access
                .roles
                .into_iter()
                .map(RoleSummaryResponse::from)
                .collect(),
        }
    }
}
