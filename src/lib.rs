use std::sync::Arc;

use axum::{Router, extract::FromRef, http::HeaderName, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core gate components.
pub mod classifier;
pub mod config;
pub mod gate;
pub mod roles;
pub mod session;

// Request handling.
pub mod handlers;
pub mod models;

// Tier-segregated route definitions.
pub mod routes;
use routes::{admin, authenticated, editor, public};

// --- Public Re-exports ---

// Core state types for the application entry point (main.rs) and tests.
pub use classifier::RouteClassifier;
pub use config::AppConfig;
pub use session::{LocalJwtVerifier, RemoteVerifier, VerifierState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation for the JSON surface. Aggregates
/// every handler decorated with `#[utoipa::path]` and the response schemas;
/// served at `/api-docs/openapi.json` behind the Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health, handlers::clerk_webhook, handlers::resend_webhook,
        handlers::uploadthing_callback, handlers::get_me, handlers::get_my_permissions,
        handlers::admin_overview, handlers::dashboard_summary, handlers::contribute_status,
    ),
    components(
        schemas(
            models::MeResponse, models::PermissionsResponse, models::TierStatusResponse,
            models::WebhookAck, roles::Role, roles::RoleClaim, roles::Permission,
        )
    ),
    tags(
        (name = "kifuliiru-portal", description = "Kifuliiru Heritage Portal Gate API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding the gate's process-wide state.
/// The classifier and the config are immutable after startup and read without
/// synchronization by every concurrent request; the verifier is a shared trait
/// object whose calls are per-request and independent.
#[derive(Clone)]
pub struct AppState {
    /// The Route Classifier, built once from the literal pattern lists.
    pub classifier: Arc<RouteClassifier>,
    /// Session verification, delegated to the identity provider.
    pub verifier: VerifierState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow extractors and middleware to pull individual components out of the
// shared AppState.

impl FromRef<AppState> for VerifierState {
    fn from_ref(app_state: &AppState) -> VerifierState {
        app_state.verifier.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure and applies the access gate plus the
/// observability layers.
///
/// The gate is a `.layer` over the whole application router *including its
/// fallback*, so unknown paths under protected prefixes (e.g. `/dashboard`)
/// are still classified and redirected rather than answered with a bare 404.
/// The Swagger UI is merged after the gate layer and therefore outside it.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Application Router Assembly
    // All tier routers are merged flat; enforcement comes from the gate layer,
    // not from per-router middleware, so a path's protection follows the
    // pattern lists even when no route is registered for it.
    let app_router = Router::new()
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .merge(editor::editor_routes())
        .merge(admin::admin_routes())
        // Explicit fallback so the gate layer wraps unmatched paths too.
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::access_gate,
        ))
        .with_state(state);

    // 3. Documentation outside the gate: the Swagger UI carries no portal
    // data and must stay reachable during local development.
    let base_router = app_router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // 4. Observability and Correlation Layers (outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 4a. Request ID generation for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 4b. Request tracing with the request ID in the span.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 4c. Propagate the generated x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 5. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes `TraceLayer` span creation: every log line for a request is
/// correlated by the generated `x-request-id` alongside method and URI.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
