use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a session. Every path here must also appear in
/// the classifier's public pattern list: the gate allows these through before
/// any session resolution, and a path present here but missing from the
/// pattern list would be redirected to sign-in despite being intended as
/// public.
///
/// The three callback receivers are the reason public precedence exists at
/// all: the external services calling them never carry a portal session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness probe for monitoring and load balancers.
        .route("/health", get(handlers::health))
        // POST /api/webhook/clerk
        // Identity-provider event callback (user sync, role changes).
        .route("/api/webhook/clerk", post(handlers::clerk_webhook))
        // POST /api/webhook/resend
        // Transactional-mail delivery event callback.
        .route("/api/webhook/resend", post(handlers::resend_webhook))
        // POST /api/uploadthing
        // Upload-service callback for completed audio uploads.
        .route("/api/uploadthing", post(handlers::uploadthing_callback))
}
