use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use paydesk_application::{MutationOutcome, RbacCollection};
use paydesk_core::{AppError, NonEmptyString};
use paydesk_domain::{
    Permission, PermissionAction, PermissionGroup, PermissionGroupUpdate, PermissionUpdate, Role,
    RoleUpdate,
};
use uuid::Uuid;

use crate::dto::{
    CreatePermissionGroupRequest, CreatePermissionRequest, CreateRoleRequest,
    PermissionGroupResponse, PermissionGroupsResponse, PermissionResponse, PermissionsResponse,
    RoleResponse, RoleWithPermissionsResponse, RolesResponse, UpdatePermissionGroupRequest,
    UpdatePermissionRequest, UpdateRoleRequest, UserRoleMappingsResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(State(state): State<AppState>) -> ApiResult<Json<RolesResponse>> {
    let items = state.store.roles().await;
    let status = state.store.status(RbacCollection::Roles).await;
    Ok(Json(RolesResponse::from_parts(items, status)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let name = NonEmptyString::new(payload.name)
        .map_err(|_| AppError::Validation("role name must not be empty".to_owned()))?;

    let role = Role {
        role_id: Uuid::new_v4().to_string(),
        name: name.into(),
        description: payload.description,
        is_active: payload.is_active,
    };
    state.store.add_role(role.clone()).await;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<StatusCode> {
    let outcome = state
        .store
        .update_role(
            role_id.as_str(),
            RoleUpdate {
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await;

    ensure_applied(outcome, "role", role_id.as_str())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<StatusCode> {
    let outcome = state.store.delete_role(role_id.as_str()).await;
    ensure_applied(outcome, "role", role_id.as_str())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<PermissionsResponse>> {
    let items = state.store.permissions().await;
    let status = state.store.status(RbacCollection::Permissions).await;
    Ok(Json(PermissionsResponse::from_parts(items, status)))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let name = NonEmptyString::new(payload.name)
        .map_err(|_| AppError::Validation("permission name must not be empty".to_owned()))?;

    let permission = Permission {
        permission_id: Uuid::new_v4().to_string(),
        name: name.into(),
        description: payload.description,
        action: PermissionAction::from_str(payload.action.as_str())?,
        group_id: payload.group_id,
        route: payload.route,
        is_active: payload.is_active,
    };
    state.store.add_permission(permission.clone()).await;

    Ok((StatusCode::CREATED, Json(PermissionResponse::from(permission))))
}

pub async fn update_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
    Json(payload): Json<UpdatePermissionRequest>,
) -> ApiResult<StatusCode> {
    let action = match payload.action {
        Some(value) => Some(PermissionAction::from_str(value.as_str())?),
        None => None,
    };

    let outcome = state
        .store
        .update_permission(
            permission_id.as_str(),
            PermissionUpdate {
                name: payload.name,
                description: payload.description,
                action,
                group_id: payload.group_id,
                route: payload.route,
                is_active: payload.is_active,
            },
        )
        .await;

    ensure_applied(outcome, "permission", permission_id.as_str())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
) -> ApiResult<StatusCode> {
    let outcome = state.store.delete_permission(permission_id.as_str()).await;
    ensure_applied(outcome, "permission", permission_id.as_str())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_permission_groups_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<PermissionGroupsResponse>> {
    let items = state.store.permission_groups().await;
    let status = state.store.status(RbacCollection::PermissionGroups).await;
    Ok(Json(PermissionGroupsResponse::from_parts(items, status)))
}

pub async fn create_permission_group_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePermissionGroupRequest>,
) -> ApiResult<(StatusCode, Json<PermissionGroupResponse>)> {
    let name = NonEmptyString::new(payload.name)
        .map_err(|_| AppError::Validation("permission group name must not be empty".to_owned()))?;

    let group = PermissionGroup {
        group_id: Uuid::new_v4().to_string(),
        name: name.into(),
        description: payload.description,
        is_active: payload.is_active,
    };
    state.store.add_permission_group(group.clone()).await;

    Ok((StatusCode::CREATED, Json(PermissionGroupResponse::from(group))))
}

pub async fn update_permission_group_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(payload): Json<UpdatePermissionGroupRequest>,
) -> ApiResult<StatusCode> {
    let outcome = state
        .store
        .update_permission_group(
            group_id.as_str(),
            PermissionGroupUpdate {
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await;

    ensure_applied(outcome, "permission group", group_id.as_str())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_permission_group_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<StatusCode> {
    let outcome = state.store.delete_permission_group(group_id.as_str()).await;
    ensure_applied(outcome, "permission group", group_id.as_str())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_user_role_mappings_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<UserRoleMappingsResponse>> {
    let items = state.store.mapped_user_roles().await;
    let status = state.store.status(RbacCollection::MappedUserRoles).await;
    Ok(Json(UserRoleMappingsResponse::from_parts(items, status)))
}

pub async fn roles_with_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleWithPermissionsResponse>>> {
    let view = state
        .store
        .roles_with_permissions()
        .await
        .into_iter()
        .map(RoleWithPermissionsResponse::from)
        .collect();
    Ok(Json(view))
}

pub async fn sync_collection_handler(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> ApiResult<StatusCode> {
    let collection = RbacCollection::from_str(collection.as_str())?;
    state.sync_service.refresh(collection).await;
    Ok(StatusCode::ACCEPTED)
}

fn ensure_applied(outcome: MutationOutcome, kind: &str, id: &str) -> ApiResult<()> {
    if outcome.is_applied() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{kind} '{id}' does not exist")).into())
    }
}
