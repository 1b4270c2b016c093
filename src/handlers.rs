use axum::{Json, http::StatusCode};
use serde_json::Value;

use crate::{
    models::{MeResponse, PermissionsResponse, TierStatusResponse, WebhookAck},
    roles::{RoleClaim, permissions_for},
    session::Principal,
};

// --- Public Handlers ---

/// health
///
/// [Public Route] Liveness probe for monitoring and load balancer checks.
#[utoipa::path(get, path = "/health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> &'static str {
    "ok"
}

/// clerk_webhook
///
/// [Public Route] Callback receiver for identity-provider events (user
/// created, role changed). The payload is acknowledged and handed to the sync
/// pipeline, which is owned by an external collaborator; this service only
/// guarantees the endpoint stays reachable without a session.
#[utoipa::path(
    post,
    path = "/api/webhook/clerk",
    responses((status = 200, description = "Event acknowledged", body = WebhookAck))
)]
pub async fn clerk_webhook(Json(payload): Json<Value>) -> Json<WebhookAck> {
    tracing::info!(
        event = payload.get("type").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
        "identity provider webhook received"
    );
    Json(WebhookAck { received: true })
}

/// resend_webhook
///
/// [Public Route] Callback receiver for transactional-mail delivery events.
#[utoipa::path(
    post,
    path = "/api/webhook/resend",
    responses((status = 200, description = "Event acknowledged", body = WebhookAck))
)]
pub async fn resend_webhook(Json(payload): Json<Value>) -> Json<WebhookAck> {
    tracing::info!(
        event = payload.get("type").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
        "mail delivery webhook received"
    );
    Json(WebhookAck { received: true })
}

/// uploadthing_callback
///
/// [Public Route] Callback receiver for the upload service (dictionary audio
/// recordings). Must never sit behind a tier: the upload service carries no
/// portal session when it reports a completed upload.
#[utoipa::path(
    post,
    path = "/api/uploadthing",
    responses((status = 200, description = "Upload event acknowledged", body = WebhookAck))
)]
pub async fn uploadthing_callback(Json(payload): Json<Value>) -> Json<WebhookAck> {
    tracing::info!(
        file_key = payload.get("fileKey").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
        "upload service callback received"
    );
    Json(WebhookAck { received: true })
}

/// not_found
///
/// Fallback for unmatched paths. Registered before the gate layer, so the
/// gate classifies and decides on every unknown path first; an unauthenticated
/// request for `/dashboard/nope` is redirected to sign-in, never answered with
/// this 404.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

// --- Authenticated Handlers ---

/// get_me
///
/// [Authenticated Route] Returns the resolved identity of the requesting
/// session. The `Principal` was stashed in request extensions by the access
/// gate, so no credential is re-verified here.
#[utoipa::path(
    get,
    path = "/api/me",
    responses((status = 200, description = "Resolved identity", body = MeResponse))
)]
pub async fn get_me(principal: Principal) -> Json<MeResponse> {
    Json(MeResponse {
        subject: principal.subject,
        role: principal.role,
    })
}

/// get_my_permissions
///
/// [Authenticated Route] Returns the Role-Permission Table row for the
/// caller's role. A session with an unset role gets the empty set, same as a
/// viewer; the distinction matters to the gate, not to feature affordances.
#[utoipa::path(
    get,
    path = "/api/me/permissions",
    responses((status = 200, description = "Granted permissions", body = PermissionsResponse))
)]
pub async fn get_my_permissions(principal: Principal) -> Json<PermissionsResponse> {
    let permissions = match principal.role {
        RoleClaim::Known(role) => permissions_for(role).to_vec(),
        RoleClaim::Unset => Vec::new(),
    };
    Json(PermissionsResponse {
        role: principal.role,
        permissions,
    })
}

// --- Tier Surface Handlers ---

/// admin_overview
///
/// [Admin-Tier Route] Confirms admission through the admin tier. The real
/// moderation and analytics content is rendered by the frontend from its own
/// data sources; this surface exists so the gated path has a terminus.
#[utoipa::path(
    get,
    path = "/admin/overview",
    responses((status = 200, description = "Admin tier admitted", body = TierStatusResponse))
)]
pub async fn admin_overview(principal: Principal) -> Json<TierStatusResponse> {
    Json(TierStatusResponse {
        tier: "admin".to_string(),
        subject: principal.subject,
        role: principal.role,
    })
}

/// dashboard_summary
///
/// [Admin-Tier Route] Same admission surface as `/admin/overview`, reached
/// through the `/dashboard` prefix.
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    responses((status = 200, description = "Admin tier admitted", body = TierStatusResponse))
)]
pub async fn dashboard_summary(principal: Principal) -> Json<TierStatusResponse> {
    Json(TierStatusResponse {
        tier: "admin".to_string(),
        subject: principal.subject,
        role: principal.role,
    })
}

/// contribute_status
///
/// [Editor-Tier Route] Confirms admission through the editor tier for the
/// contribution workflow.
#[utoipa::path(
    get,
    path = "/contribute/status",
    responses((status = 200, description = "Editor tier admitted", body = TierStatusResponse))
)]
pub async fn contribute_status(principal: Principal) -> Json<TierStatusResponse> {
    Json(TierStatusResponse {
        tier: "editor".to_string(),
        subject: principal.subject,
        role: principal.role,
    })
}
