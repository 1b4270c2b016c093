use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Role
///
/// The closed set of roles the identity provider may assert for a portal user.
/// Exactly one role is attached to a principal at decision time. A session whose
/// role claim is missing or does not match any of these variants is normalized
/// to [`RoleClaim::Unset`] instead, never to a default role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
    Viewer,
}

impl Role {
    /// Parses the raw role string carried in verified session claims.
    /// Unknown values yield `None`; callers must treat that as "role unset",
    /// not as an error and not as any fallback role.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "super_admin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    /// The wire form of the role, matching what the identity provider asserts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Roles allowed through admin-tier routes.
    pub fn is_admin_tier(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    /// Roles allowed through editor-tier routes. Admin-tier roles are a
    /// superset of editor-tier roles.
    pub fn is_editor_tier(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin | Role::Editor)
    }
}

/// RoleClaim
///
/// The normalized outcome of reading the role claim from a *verified* session.
/// `Unset` covers both "claim absent" and "claim present but unrecognized";
/// the gate treats either as insufficient privilege for any protected tier.
/// This is deliberately distinct from being unauthenticated: an `Unset` user
/// holds a valid session and may still reach untier-ed protected routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RoleClaim {
    Known(Role),
    Unset,
}

impl RoleClaim {
    /// Normalizes an optional raw claim string against the closed [`Role`] enum.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.and_then(Role::parse) {
            Some(role) => RoleClaim::Known(role),
            None => RoleClaim::Unset,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RoleClaim::Known(role) => Some(*role),
            RoleClaim::Unset => None,
        }
    }
}

/// Permission
///
/// Capability tokens consumed by downstream feature code (dictionary editing,
/// contribution review, dashboards). Permissions are never combined at runtime;
/// the role mapping below is the single source of truth and changes only with
/// the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Permission {
    CreateEntry,
    EditEntry,
    DeleteEntry,
    ApproveEntry,
    RecordAudio,
    ManageUsers,
    ViewAnalytics,
}

/// permissions_for
///
/// The static Role-Permission Table. Total over [`Role`]: every variant maps to
/// a (possibly empty) permission slice, so this lookup has no failure mode:
/// unknown roles are rejected earlier, at the [`RoleClaim`] normalization
/// boundary. `Viewer` intentionally maps to the empty set: viewers browse
/// published content only.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    use Permission::*;
    match role {
        Role::SuperAdmin => &[
            CreateEntry,
            EditEntry,
            DeleteEntry,
            ApproveEntry,
            RecordAudio,
            ManageUsers,
            ViewAnalytics,
        ],
        Role::Admin => &[
            CreateEntry,
            EditEntry,
            DeleteEntry,
            ApproveEntry,
            RecordAudio,
            ViewAnalytics,
        ],
        Role::Editor => &[CreateEntry, EditEntry, RecordAudio],
        Role::Viewer => &[],
    }
}
