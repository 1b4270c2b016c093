/// Route Classifier
///
/// Categorizes an incoming request path into the portal's protection tiers.
/// The classifier is built once at startup from three literal pattern lists
/// (public, admin-tier, editor-tier), held immutably inside `AppState`, and
/// consulted read-only by the access gate on every request. There is no setter
/// and no runtime mutation; concurrent unsynchronized reads are safe.

/// RoutePattern
///
/// A single path-matching rule. Two forms are supported:
///
/// - exact: `/about` matches only `/about`;
/// - wildcard suffix: `/admin(.*)` matches `/admin` itself plus any path that
///   continues from that prefix (`/admin/users`, `/admin/users/42`). The
///   continuation must start at a segment boundary, so `/admin(.*)` does not
///   match `/administrivia`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    Prefix(String),
}

impl RoutePattern {
    /// Parses the string form used in the pattern lists. A trailing `(.*)`
    /// selects the wildcard-suffix form; anything else is an exact match.
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("(.*)") {
            Some(prefix) => RoutePattern::Prefix(prefix.to_string()),
            None => RoutePattern::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(exact) => path == exact,
            RoutePattern::Prefix(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Classification
///
/// The tier membership tuple for one request path. A path may sit in several
/// categories at once when pattern prefixes overlap; precedence between the
/// flags is the gate's concern (public short-circuits everything, admin-tier
/// is evaluated before editor-tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_public: bool,
    pub is_admin_tier: bool,
    pub is_editor_tier: bool,
}

/// RouteClassifier
///
/// Pure, deterministic, total classification over valid request paths. A path
/// belongs to a category if it matches ANY pattern in that category's list.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    public: Vec<RoutePattern>,
    admin_tier: Vec<RoutePattern>,
    editor_tier: Vec<RoutePattern>,
}

impl RouteClassifier {
    pub fn new(public: &[&str], admin_tier: &[&str], editor_tier: &[&str]) -> Self {
        let parse_all = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| RoutePattern::parse(p))
                .collect::<Vec<_>>()
        };
        Self {
            public: parse_all(public),
            admin_tier: parse_all(admin_tier),
            editor_tier: parse_all(editor_tier),
        }
    }

    /// The production pattern lists for the portal.
    ///
    /// The webhook and upload-service callbacks MUST stay public: the external
    /// services calling them carry no portal session, and blocking them behind
    /// a stricter tier because of an overlapping prefix would silently break
    /// user sync and media ingestion.
    pub fn default_for_portal() -> Self {
        Self::new(
            &[
                "/",
                "/about",
                "/health",
                "/kifuliiru(.*)",
                "/culture(.*)",
                "/api/webhook/clerk(.*)",
                "/api/webhook/resend(.*)",
                "/api/uploadthing(.*)",
            ],
            &["/admin(.*)", "/dashboard(.*)", "/settings(.*)"],
            &["/edit(.*)", "/contribute(.*)"],
        )
    }

    /// classify
    ///
    /// No side effects, no hidden state: the same path always yields the same
    /// tuple for the lifetime of the process.
    pub fn classify(&self, path: &str) -> Classification {
        let matches_any = |patterns: &[RoutePattern]| patterns.iter().any(|p| p.matches(path));
        Classification {
            is_public: matches_any(&self.public),
            is_admin_tier: matches_any(&self.admin_tier),
            is_editor_tier: matches_any(&self.editor_tier),
        }
    }
}

/// File extensions the gate never inspects. Static assets carry no session
/// semantics; skipping them keeps the access log readable. This is a
/// noise-reduction optimization, not a security boundary.
const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    "css", "js", "map", "ico", "png", "jpg", "jpeg", "svg", "webp", "woff", "woff2", "ttf", "mp3",
    "ogg", "wav",
];

/// Framework-reserved prefix served outside the application's routing.
const FRAMEWORK_INTERNAL_PREFIX: &str = "/_next";

/// is_excluded
///
/// The gate's matcher scope: paths for which the middleware forwards the
/// request untouched, without classifying or resolving a session.
pub fn is_excluded(path: &str) -> bool {
    if path == FRAMEWORK_INTERNAL_PREFIX
        || path
            .strip_prefix(FRAMEWORK_INTERNAL_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
    {
        return true;
    }
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && STATIC_ASSET_EXTENSIONS.contains(&ext),
        None => false,
    }
}
