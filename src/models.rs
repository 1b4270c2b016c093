use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::roles::{Permission, RoleClaim};

// --- Response Schemas (consumed by the TS frontend) ---

/// MeResponse
///
/// The resolved identity of the requesting session, as exposed to the
/// frontend. Mirrors the gate's `Principal` minus the raw provider claims.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MeResponse {
    /// Opaque subject id assigned by the identity provider.
    pub subject: String,
    /// Normalized role claim; `unset` when the provider asserted no
    /// recognizable role.
    pub role: RoleClaim,
}

/// PermissionsResponse
///
/// One row of the Role-Permission Table, for the caller's role. The frontend
/// consults this to show or hide feature affordances; enforcement stays with
/// the route gate.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PermissionsResponse {
    pub role: RoleClaim,
    /// Empty for `viewer` and for sessions with an unset role.
    pub permissions: Vec<Permission>,
}

/// TierStatusResponse
///
/// Placeholder payload returned by the gated tier surfaces (`/admin/overview`,
/// `/dashboard/summary`, `/contribute/status`). Confirms which tier admitted
/// the request and as whom; the real feature content lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TierStatusResponse {
    pub tier: String,
    pub subject: String,
    pub role: RoleClaim,
}

/// WebhookAck
///
/// Minimal acknowledgement body for the public callback receivers. The
/// external service only needs a 2xx; payload processing is owned by the
/// calling collaborator's pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct WebhookAck {
    pub received: bool,
}
