use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Routes under the admin-tier prefixes (`/admin`, `/dashboard`,
/// `/settings`). The gate admits only principals with the `super_admin` or
/// `admin` role; everyone else, including editors, is redirected to
/// `/unauthorized` before these handlers run.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/overview
        // Admission surface for the moderation/administration frontend.
        .route("/admin/overview", get(handlers::admin_overview))
        // GET /dashboard/summary
        // Admission surface for the analytics dashboard frontend.
        .route("/dashboard/summary", get(handlers::dashboard_summary))
}
