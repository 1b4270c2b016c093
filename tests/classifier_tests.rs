use kifuliiru_portal::classifier::{RouteClassifier, RoutePattern, is_excluded};

// --- Pattern Matching ---

#[test]
fn exact_pattern_matches_only_itself() {
    let pattern = RoutePattern::parse("/about");
    assert!(pattern.matches("/about"));
    assert!(!pattern.matches("/about/team"));
    assert!(!pattern.matches("/aboutus"));
}

#[test]
fn wildcard_pattern_matches_prefix_and_trailing_segments() {
    let pattern = RoutePattern::parse("/admin(.*)");
    assert!(pattern.matches("/admin"));
    assert!(pattern.matches("/admin/users"));
    assert!(pattern.matches("/admin/users/42/edit"));
}

#[test]
fn wildcard_pattern_respects_segment_boundaries() {
    // "/admin(.*)" must not classify "/administrivia" as admin-tier.
    let pattern = RoutePattern::parse("/admin(.*)");
    assert!(!pattern.matches("/administrivia"));
    assert!(!pattern.matches("/admins"));
}

#[test]
fn root_exact_pattern_does_not_swallow_everything() {
    let pattern = RoutePattern::parse("/");
    assert!(pattern.matches("/"));
    assert!(!pattern.matches("/admin"));
}

// --- Production Pattern Lists ---

#[test]
fn portal_classifier_marks_home_and_cultural_pages_public() {
    let classifier = RouteClassifier::default_for_portal();

    for path in [
        "/",
        "/about",
        "/health",
        "/kifuliiru",
        "/kifuliiru/dictionary",
        "/culture/proverbs",
    ] {
        let c = classifier.classify(path);
        assert!(c.is_public, "{path} should be public");
        assert!(!c.is_admin_tier, "{path} should not be admin-tier");
        assert!(!c.is_editor_tier, "{path} should not be editor-tier");
    }
}

#[test]
fn portal_classifier_marks_callback_endpoints_public() {
    let classifier = RouteClassifier::default_for_portal();

    for path in [
        "/api/webhook/clerk",
        "/api/webhook/clerk/foo",
        "/api/webhook/resend/delivery",
        "/api/uploadthing",
        "/api/uploadthing/callback",
    ] {
        assert!(classifier.classify(path).is_public, "{path} should be public");
    }
}

#[test]
fn every_registered_public_endpoint_is_in_the_public_pattern_list() {
    // The public router and the public pattern list must stay in sync: a path
    // served by public_routes() but missing here would be redirected to
    // sign-in by the gate despite being intended as public. Mirrors the
    // endpoints registered in src/routes/public.rs.
    let classifier = RouteClassifier::default_for_portal();

    for path in ["/health", "/api/webhook/clerk", "/api/webhook/resend", "/api/uploadthing"] {
        assert!(
            classifier.classify(path).is_public,
            "{path} is registered public but not classified public"
        );
    }
}

#[test]
fn portal_classifier_marks_admin_prefixes_admin_tier() {
    let classifier = RouteClassifier::default_for_portal();

    for path in ["/admin", "/admin/users", "/dashboard", "/dashboard/summary", "/settings/profile"] {
        let c = classifier.classify(path);
        assert!(c.is_admin_tier, "{path} should be admin-tier");
        assert!(!c.is_public, "{path} should not be public");
    }
}

#[test]
fn portal_classifier_marks_editor_prefixes_editor_tier() {
    let classifier = RouteClassifier::default_for_portal();

    for path in ["/edit", "/edit/entry/42", "/contribute", "/contribute/new"] {
        let c = classifier.classify(path);
        assert!(c.is_editor_tier, "{path} should be editor-tier");
        assert!(!c.is_public, "{path} should not be public");
    }
}

#[test]
fn untier_ed_protected_paths_match_nothing() {
    let classifier = RouteClassifier::default_for_portal();

    let c = classifier.classify("/api/me");
    assert!(!c.is_public);
    assert!(!c.is_admin_tier);
    assert!(!c.is_editor_tier);
}

#[test]
fn classification_is_idempotent() {
    // Pure function, no hidden state drift between calls.
    let classifier = RouteClassifier::default_for_portal();

    for path in ["/", "/admin/users", "/contribute/new", "/api/webhook/clerk/foo", "/api/me"] {
        assert_eq!(classifier.classify(path), classifier.classify(path));
    }
}

#[test]
fn overlapping_lists_classify_into_both_categories() {
    // ConfigurationAmbiguity coverage: a path matching a public AND an
    // admin-tier pattern must report both flags. Precedence is the gate's
    // job; the classifier must not silently drop one category.
    let classifier = RouteClassifier::new(
        &["/admin/health(.*)"],
        &["/admin(.*)"],
        &[],
    );

    let c = classifier.classify("/admin/health/live");
    assert!(c.is_public);
    assert!(c.is_admin_tier);
}

// --- Matcher Scope Exclusions ---

#[test]
fn static_asset_extensions_are_excluded() {
    for path in [
        "/favicon.ico",
        "/assets/app.css",
        "/assets/app.js",
        "/images/flag.svg",
        "/audio/mugani.mp3",
        "/fonts/inter.woff2",
    ] {
        assert!(is_excluded(path), "{path} should be excluded");
    }
}

#[test]
fn framework_internal_prefix_is_excluded() {
    assert!(is_excluded("/_next"));
    assert!(is_excluded("/_next/static/chunk.js"));
    assert!(!is_excluded("/_nextstep"));
}

#[test]
fn application_paths_are_not_excluded() {
    for path in ["/", "/admin/users", "/api/me", "/contribute/new", "/dictionary/mulala"] {
        assert!(!is_excluded(path), "{path} should reach the gate");
    }
}

#[test]
fn dotfile_segments_are_not_asset_excluded() {
    // A path ending in a bare ".js"-style segment with an empty stem is not a
    // static asset.
    assert!(!is_excluded("/downloads/.css"));
}
