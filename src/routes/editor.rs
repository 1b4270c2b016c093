use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Editor Router Module
///
/// Routes under the editor-tier prefixes (`/edit`, `/contribute`). The gate
/// admits `super_admin`, `admin` and `editor` roles; viewers and unset-role
/// sessions are redirected to `/unauthorized`.
pub fn editor_routes() -> Router<AppState> {
    Router::new()
        // GET /contribute/status
        // Admission surface for the contribution workflow frontend.
        .route("/contribute/status", get(handlers::contribute_status))
}
