use std::str::FromStr;

use paydesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Action kinds a permission can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Read access to a resource.
    Read,
    /// Write access to a resource.
    Write,
    /// Permission to delete a resource.
    Delete,
    /// Permission to update an existing resource.
    Update,
    /// Permission to create a new resource.
    Create,
    /// Full administrative control over a resource.
    Manage,
}

impl PermissionAction {
    /// Returns a stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Create => "create",
            Self::Manage => "manage",
        }
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            "update" => Ok(Self::Update),
            "create" => Ok(Self::Create),
            "manage" => Ok(Self::Manage),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

/// Named bundle of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role identifier, opaque and unique within the role collection.
    pub role_id: String,
    /// Unique role name.
    pub name: String,
    /// Human-readable role description.
    pub description: String,
    /// Whether the role is currently active.
    pub is_active: bool,
}

/// Partial update applied to an existing role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoleUpdate {
    /// Replacement role name, when present.
    pub name: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement active flag, when present.
    pub is_active: Option<bool>,
}

/// Atomic capability, tagged with an action kind and optional group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable permission identifier.
    pub permission_id: String,
    /// Unique permission name.
    pub name: String,
    /// Human-readable permission description.
    pub description: String,
    /// Action kind granted by this permission.
    pub action: PermissionAction,
    /// Owning permission group, when assigned. Cosmetic only.
    pub group_id: Option<String>,
    /// Console route guarded by this permission.
    pub route: String,
    /// Whether the permission is currently active.
    pub is_active: bool,
}

/// Partial update applied to an existing permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PermissionUpdate {
    /// Replacement permission name, when present.
    pub name: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement action kind, when present.
    pub action: Option<PermissionAction>,
    /// Replacement group reference, when present. `Some(None)` clears the group.
    pub group_id: Option<Option<String>>,
    /// Replacement route, when present.
    pub route: Option<String>,
    /// Replacement active flag, when present.
    pub is_active: Option<bool>,
}

/// Cosmetic categorization of permissions. No authorization effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    /// Stable group identifier.
    pub group_id: String,
    /// Unique group name.
    pub name: String,
    /// Human-readable group description.
    pub description: String,
    /// Whether the group is currently active.
    pub is_active: bool,
}

/// Partial update applied to an existing permission group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PermissionGroupUpdate {
    /// Replacement group name, when present.
    pub name: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement active flag, when present.
    pub is_active: Option<bool>,
}

/// Permission fields carried inside the composed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSummary {
    /// Stable permission identifier.
    pub permission_id: String,
    /// Permission name.
    pub name: String,
    /// Console route guarded by this permission.
    pub route: String,
    /// Action kind granted by this permission.
    pub action: PermissionAction,
    /// Whether the permission is currently active.
    pub is_active: bool,
}

impl PermissionSummary {
    /// Builds a summary from a full permission record.
    #[must_use]
    pub fn from_permission(permission: &Permission) -> Self {
        Self {
            permission_id: permission.permission_id.clone(),
            name: permission.name.clone(),
            route: permission.route.clone(),
            action: permission.action,
            is_active: permission.is_active,
        }
    }
}

/// Role fields carried inside user mappings and projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    /// Stable role identifier.
    pub role_id: String,
    /// Role name.
    pub name: String,
}

/// Denormalized role entry joined with its known permission grants.
///
/// Always derived from the role collection and mapping batches; never created
/// independently. Every role in the authoritative role list has exactly one
/// corresponding entry, with an empty permission list until a mapping arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWithPermissions {
    /// Stable role identifier.
    pub role_id: String,
    /// Role name.
    pub name: String,
    /// Human-readable role description.
    pub description: String,
    /// Whether the role is currently active.
    pub is_active: bool,
    /// Ordered permission grants known for this role.
    pub permissions: Vec<PermissionSummary>,
}

impl RoleWithPermissions {
    /// Synthesizes an entry for a role with no known permission grants.
    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        Self {
            role_id: role.role_id.clone(),
            name: role.name.clone(),
            description: role.description.clone(),
            is_active: role.is_active,
            permissions: Vec::new(),
        }
    }
}

/// User fields carried inside user-role mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Stable user identifier.
    pub user_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
}

/// A user together with the ordered list of roles assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedUserRole {
    /// The mapped user.
    pub user: UserSummary,
    /// Roles currently assigned to the user.
    pub roles: Vec<RoleSummary>,
}
