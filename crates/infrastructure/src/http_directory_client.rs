use std::time::Duration;

use async_trait::async_trait;
use paydesk_application::DirectoryClient;
use paydesk_core::{AppError, AppResult};
use paydesk_domain::{
    MappedUserRole, Permission, PermissionAction, PermissionGroup, PermissionSummary, Role,
    RoleWithPermissions,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Directory payloads arrive as a bare array or wrapped in a `details`
/// envelope. A missing `details` key or an empty array means "nothing to
/// merge", not an error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DirectoryPayload<T> {
    Bare(Vec<T>),
    Enveloped { details: Option<Vec<T>> },
}

impl<T> DirectoryPayload<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Enveloped { details } => details.unwrap_or_default(),
        }
    }
}

/// One row of the role-permission mapping feed.
#[derive(Debug, Deserialize)]
struct RolePermissionRow {
    role: RoleRef,
    permission: Option<PermissionRef>,
}

#[derive(Debug, Deserialize)]
struct RoleRef {
    role_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct PermissionRef {
    permission_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    route: String,
    #[serde(default = "default_action")]
    action: PermissionAction,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

fn default_action() -> PermissionAction {
    PermissionAction::Read
}

/// Folds flat role-permission rows into per-role composed entries, grouped by
/// role identifier in first-seen order.
fn fold_mapping_rows(rows: Vec<RolePermissionRow>) -> Vec<RoleWithPermissions> {
    let mut entries: Vec<RoleWithPermissions> = Vec::new();

    for row in rows {
        let index = match entries
            .iter()
            .position(|entry| entry.role_id == row.role.role_id)
        {
            Some(index) => index,
            None => {
                entries.push(RoleWithPermissions {
                    role_id: row.role.role_id,
                    name: row.role.name,
                    description: row.role.description,
                    is_active: row.role.is_active,
                    permissions: Vec::new(),
                });
                entries.len() - 1
            }
        };

        if let Some(permission) = row.permission {
            entries[index].permissions.push(PermissionSummary {
                permission_id: permission.permission_id,
                name: permission.name,
                route: permission.route,
                action: permission.action,
                is_active: permission.is_active,
            });
        }
    }

    entries
}

/// Directory client backed by the gateway's REST API.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectoryClient {
    /// Creates a client for the directory at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        let endpoint = format!("{}{path}", self.base_url);
        let response = self.client.get(&endpoint).send().await.map_err(|error| {
            AppError::Internal(format!("failed to call directory endpoint '{path}': {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(AppError::Internal(format!(
                "directory endpoint '{path}' returned status {}: {body}",
                status.as_u16()
            )));
        }

        let payload = response
            .json::<DirectoryPayload<T>>()
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to parse directory endpoint '{path}' response body: {error}"
                ))
            })?;

        Ok(payload.into_items())
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn fetch_roles(&self) -> AppResult<Vec<Role>> {
        self.get_collection("/roles").await
    }

    async fn fetch_permissions(&self) -> AppResult<Vec<Permission>> {
        self.get_collection("/permissions").await
    }

    async fn fetch_permission_groups(&self) -> AppResult<Vec<PermissionGroup>> {
        self.get_collection("/permission-groups").await
    }

    async fn fetch_mapped_user_roles(&self) -> AppResult<Vec<MappedUserRole>> {
        self.get_collection("/user-role-mappings").await
    }

    async fn fetch_role_permission_mappings(&self) -> AppResult<Vec<RoleWithPermissions>> {
        let rows = self
            .get_collection::<RolePermissionRow>("/role-permission-mappings")
            .await?;
        Ok(fold_mapping_rows(rows))
    }
}
