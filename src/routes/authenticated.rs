use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes for any signed-in user, regardless of role: these paths match no
/// tier pattern, so the gate requires only a valid session. A principal whose
/// role claim is unset still reaches these handlers; tier membership is
/// irrelevant here.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // GET /api/me
        // The resolved identity of the requesting session.
        .route("/api/me", get(handlers::get_me))
        // GET /api/me/permissions
        // The Role-Permission Table row for the caller's role. Consulted by
        // the frontend for feature affordances; never a substitute for the
        // route gate.
        .route("/api/me/permissions", get(handlers::get_my_permissions))
}
