/// Router Module Index
///
/// Organizes the service's routing into tier-segregated modules matching the
/// gate's pattern lists. Enforcement does NOT live here: the `access_gate`
/// middleware in `lib.rs` classifies every incoming path and decides before
/// any of these routers run. The segregation keeps each tier's surface
/// reviewable in one place, so a route added to the wrong module is caught in
/// review rather than discovered as an exposure.

/// Routes matching the public pattern list (anonymous, no session required).
pub mod public;

/// Routes behind authentication but outside any tier (any signed-in user,
/// including sessions with an unset role).
pub mod authenticated;

/// Routes matching the editor-tier pattern list.
pub mod editor;

/// Routes matching the admin-tier pattern list.
pub mod admin;
