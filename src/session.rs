use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::roles::RoleClaim;

/// SessionClaims
///
/// The payload the identity provider places inside a verified session. Only
/// `sub` and the optional `role` are interpreted here; everything else the
/// provider asserts is retained verbatim in `extra` for downstream readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (sub): the identity provider's opaque user id.
    pub sub: String,
    /// Role claim asserted by the provider. May be absent or carry a value
    /// outside the portal's role enum; normalization happens at resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration Time (exp): seconds since epoch after which the session
    /// must not be accepted. Always validated by the local verifier.
    pub exp: usize,
    /// Issued At (iat).
    pub iat: usize,
    /// Remaining provider claims, carried read-only.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Principal
///
/// The per-request authenticated identity. Derived from verified credentials,
/// valid only for the lifetime of one request, never persisted by this
/// service. The identity provider owns the underlying session; the gate and
/// handlers read it.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Opaque subject id assigned by the identity provider.
    pub subject: String,
    /// Normalized role claim. `Unset` is a valid authenticated state.
    pub role: RoleClaim,
    /// Raw provider claims beyond sub/role, read-only.
    pub claims: Map<String, Value>,
}

impl Principal {
    fn from_claims(claims: SessionClaims) -> Self {
        Self {
            subject: claims.sub,
            role: RoleClaim::normalize(claims.role.as_deref()),
            claims: claims.extra,
        }
    }
}

/// SessionVerifier Trait
///
/// Abstract contract for credential verification, which this service delegates
/// to the identity provider. Implementations return `None` for ANY failure:
/// bad signature, expired token, malformed payload, transport error. The
/// caller cannot distinguish failure causes, and must not: the system fails
/// closed, and verification internals never reach the client.
///
/// **Send + Sync + async_trait** make the trait object (`Arc<dyn
/// SessionVerifier>`) shareable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Option<SessionClaims>;
}

/// VerifierState
///
/// The concrete type used to share the verifier across the application state.
pub type VerifierState = Arc<dyn SessionVerifier>;

/// LocalJwtVerifier
///
/// Verifies session JWTs against the HS256 secret shared with the identity
/// provider, without a network round trip. This is the production default.
pub struct LocalJwtVerifier {
    decoding_key: DecodingKey,
}

impl LocalJwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[async_trait]
impl SessionVerifier for LocalJwtVerifier {
    async fn verify(&self, credential: &str) -> Option<SessionClaims> {
        let mut validation = Validation::default();
        // Expiration validation is always active. An expired session is the
        // most common valid-but-stale credential and must be rejected.
        validation.validate_exp = true;

        match decode::<SessionClaims>(credential, &self.decoding_key, &validation) {
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                // Log the kind for operators; the client only ever sees the
                // sign-in redirect.
                tracing::debug!(error = ?e.kind(), "session token failed verification");
                None
            }
        }
    }
}

/// RemoteVerifier
///
/// Verifies the credential by introspection against the identity provider's
/// API. Used where the shared secret is not distributed to this service.
/// Inherits whatever timeout the configured HTTP client enforces; no retries
/// are performed, a failed call is a definitive Unauthenticated for this
/// request.
pub struct RemoteVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl RemoteVerifier {
    pub fn new(identity_api_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            verify_url: format!("{}/v1/sessions/verify", identity_api_url),
        }
    }
}

#[async_trait]
impl SessionVerifier for RemoteVerifier {
    async fn verify(&self, credential: &str) -> Option<SessionClaims> {
        let response = self
            .client
            .post(&self.verify_url)
            .json(&serde_json::json!({ "token": credential }))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<SessionClaims>().await {
                Ok(claims) => Some(claims),
                Err(e) => {
                    tracing::warn!(error = %e, "identity provider returned malformed session claims");
                    None
                }
            },
            Ok(resp) => {
                tracing::debug!(status = %resp.status(), "identity provider rejected session");
                None
            }
            Err(e) => {
                // Transport failure collapses to Unauthenticated. Fail closed.
                tracing::warn!(error = %e, "identity provider verification call failed");
                None
            }
        }
    }
}

/// Name of the session cookie issued by the identity provider.
const SESSION_COOKIE: &str = "__session";

/// extract_credential
///
/// Pulls the raw session credential from the request: the `__session` cookie
/// takes precedence (browser navigation), falling back to an `Authorization:
/// Bearer` header (API clients).
pub fn extract_credential(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookie_header.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// resolve_session
///
/// The Session Resolver contract: request credentials in, `Principal` or
/// Unauthenticated (`None`) out.
///
/// - No credential present → `None`.
/// - Credential present but verification fails for any reason → `None`; the
///   failure is never surfaced as an error to the caller.
/// - Verified but the role claim is missing or unrecognized → a `Principal`
///   with `RoleClaim::Unset`, which downstream treats as insufficient
///   privilege for any protected tier. Distinct from Unauthenticated.
pub async fn resolve_session(headers: &HeaderMap, verifier: &VerifierState) -> Option<Principal> {
    let credential = extract_credential(headers)?;
    let claims = verifier.verify(&credential).await?;
    Some(Principal::from_claims(claims))
}

/// Principal Extractor Implementation
///
/// Makes `Principal` usable as a handler argument on authenticated routes.
/// The access gate resolves the session once per request and stashes the
/// principal in request extensions; the extractor reads it from there, falling
/// back to resolving directly when a handler is exercised without the gate
/// (unit tests, internal routers).
///
/// Rejection: 401 UNAUTHORIZED. Routes behind the gate never observe the
/// rejection in practice, because the gate has already redirected
/// unauthenticated requests to sign-in.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
    VerifierState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let verifier = VerifierState::from_ref(state);
        resolve_session(&parts.headers, &verifier)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
