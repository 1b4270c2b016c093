use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    classifier::{Classification, is_excluded},
    roles::RoleClaim,
    session::{Principal, resolve_session},
};

/// Decision
///
/// The gate's complete outcome space. Every call site pattern-matches this
/// exhaustively; there is no exception-style control flow and no retry. The
/// first decision for a request is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Relative URL the client is sent to, resolved against the origin of the
    /// original request.
    Redirect(String),
}

/// RedirectTargets
///
/// The two fixed destinations a denied request can be sent to.
#[derive(Debug, Clone)]
pub struct RedirectTargets {
    pub sign_in: String,
    pub unauthorized: String,
}

impl RedirectTargets {
    /// Sign-in target carrying the originally requested path, so the provider
    /// can send the user back after authentication.
    fn sign_in_with_return(&self, original_path: &str) -> String {
        format!(
            "{}?redirect_url={}",
            self.sign_in,
            encode_query_value(original_path)
        )
    }
}

/// Percent-encodes a path for use as a query parameter value. Unreserved
/// characters and `/` pass through; everything else (`?`, `#`, `&` included)
/// is encoded so the original path survives the round trip through the
/// sign-in redirect.
fn encode_query_value(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// decide
///
/// The Access Decision Gate. Pure function over the classification and the
/// resolved principal; evaluation order is part of the contract:
///
/// 1. Public wins over everything. Webhook and upload callbacks share path
///    prefixes with nothing today, but if a stricter pattern ever overlaps a
///    public one, the public route must stay reachable.
/// 2. Every non-public path requires an authenticated principal.
/// 3. Admin-tier is evaluated before editor-tier. For a path matching both,
///    the stricter admin-tier role set decides; an editor hitting such a path
///    is redirected even though editor-tier alone would have admitted them.
/// 4. Authenticated requests to untier-ed protected paths pass through; the
///    role claim (including `Unset`) is the handlers' concern from there.
pub fn decide(
    classification: Classification,
    principal: Option<&Principal>,
    targets: &RedirectTargets,
    original_path: &str,
) -> Decision {
    if classification.is_public {
        return Decision::Allow;
    }

    let Some(principal) = principal else {
        return Decision::Redirect(targets.sign_in_with_return(original_path));
    };

    if classification.is_admin_tier {
        return match principal.role {
            RoleClaim::Known(role) if role.is_admin_tier() => Decision::Allow,
            _ => Decision::Redirect(targets.unauthorized.clone()),
        };
    }

    if classification.is_editor_tier {
        return match principal.role {
            RoleClaim::Known(role) if role.is_editor_tier() => Decision::Allow,
            _ => Decision::Redirect(targets.unauthorized.clone()),
        };
    }

    Decision::Allow
}

/// access_gate
///
/// The middleware enforcing the gate on every request: classify the path,
/// resolve the session when the path is protected, decide, and either forward
/// to the inner service or answer with a 307 redirect.
///
/// Paths in the exclusion list (static assets, framework internals) are
/// forwarded without classification or session resolution.
///
/// On `Allow` for a protected path, the resolved `Principal` is stashed in
/// request extensions so handlers extract it without verifying the credential
/// a second time.
pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if is_excluded(&path) {
        return next.run(request).await;
    }

    let classification = state.classifier.classify(&path);

    // Public paths skip session resolution entirely; the decision cannot
    // depend on the principal.
    let principal = if classification.is_public {
        None
    } else {
        resolve_session(request.headers(), &state.verifier).await
    };

    let targets = RedirectTargets {
        sign_in: state.config.sign_in_path.clone(),
        unauthorized: state.config.unauthorized_path.clone(),
    };

    match decide(classification, principal.as_ref(), &targets, &path) {
        Decision::Allow => {
            if let Some(principal) = principal {
                request.extensions_mut().insert(principal);
            }
            next.run(request).await
        }
        Decision::Redirect(target) => {
            // Denials are navigational events, not application errors.
            match &principal {
                Some(p) => tracing::info!(
                    subject = %p.subject,
                    role = ?p.role,
                    path = %path,
                    "insufficient role, redirecting to unauthorized"
                ),
                None => tracing::debug!(path = %path, "unauthenticated, redirecting to sign-in"),
            }
            Redirect::temporary(&target).into_response()
        }
    }
}
