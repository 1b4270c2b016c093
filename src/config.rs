use std::env;

/// AppConfig
///
/// The application's entire configuration state, loaded once at startup and
/// immutable thereafter. It is pulled into handlers and middleware through
/// `FromRef` on the shared application state, so every request sees the same
/// values without synchronization.
#[derive(Clone)]
pub struct AppConfig {
    // Secret shared with the identity provider, used to verify session JWTs.
    pub session_jwt_secret: String,
    // Base URL of the identity provider's API, used by the remote verifier.
    pub identity_api_url: String,
    // Relative redirect target for unauthenticated requests.
    pub sign_in_path: String,
    // Relative redirect target for authenticated-but-underprivileged requests.
    pub unauthorized_path: String,
    // Runtime environment marker. Controls log formatting and dev conveniences.
    pub env: Env,
}

/// Env
///
/// Runtime context switch between development conveniences (pretty logs) and
/// production infrastructure (JSON logs, mandatory secrets).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe, non-panicking configuration for test scaffolding. Allows state
    /// setup without any environment variables present.
    fn default() -> Self {
        Self {
            session_jwt_secret: "super-secure-test-secret-value-local".to_string(),
            identity_api_url: "http://localhost:9100".to_string(),
            sign_in_path: "/sign-in".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Canonical startup initialization, reading all parameters from
    /// environment variables with a fail-fast policy.
    ///
    /// # Panics
    /// Panics if a secret required for the current runtime environment is not
    /// set. Starting with an incomplete production configuration would mean
    /// verifying sessions against a known default secret, which must never
    /// happen.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let session_jwt_secret = match env {
            Env::Production => env::var("SESSION_JWT_SECRET")
                .expect("FATAL: SESSION_JWT_SECRET must be set in production."),
            _ => env::var("SESSION_JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let identity_api_url = match env {
            Env::Production => env::var("IDENTITY_API_URL")
                .expect("FATAL: IDENTITY_API_URL must be set in production."),
            _ => {
                env::var("IDENTITY_API_URL").unwrap_or_else(|_| "http://localhost:9100".to_string())
            }
        };

        Self {
            session_jwt_secret,
            identity_api_url,
            // The redirect targets are fixed relative URLs, resolved by the
            // client against the original request's origin.
            sign_in_path: "/sign-in".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
            env,
        }
    }
}
