//! Resource pattern and action matching.
//!
//! A stored grant names its resource with a pattern. The pattern either equals
//! the queried resource id, or contains a `*` and matches every resource id that
//! starts with the text in front of the first `*`. Anything after the first `*`
//! is ignored, so `/a/*/b/*` behaves exactly like `/a/*`. There is no glob or
//! regex support beyond that single trailing wildcard.

/// Literal value that stands for "any action" or "any suffix".
pub const WILDCARD: &str = "*";

const WILDCARD_CHAR: char = '*';

/// Returns whether a stored resource pattern covers a concrete resource id.
///
/// Exact equality always matches, even when the resource id itself contains
/// a `*`.
#[must_use]
pub fn resource_matches(pattern: &str, resource_id: &str) -> bool {
    if pattern == resource_id {
        return true;
    }

    match pattern.find(WILDCARD_CHAR) {
        Some(index) => resource_id.starts_with(&pattern[..index]),
        None => false,
    }
}

/// Returns whether a stored action covers the requested action.
///
/// Only the stored side may be a wildcard. A requested action of `*` is
/// compared literally.
#[must_use]
pub fn action_matches(granted: &str, requested: &str) -> bool {
    granted == requested || granted == WILDCARD
}

/// Returns whether a grant is applicable to one concrete access check.
#[must_use]
pub fn grant_applies(
    granted_resource: &str,
    granted_action: &str,
    resource_id: &str,
    action: &str,
) -> bool {
    resource_matches(granted_resource, resource_id) && action_matches(granted_action, action)
}
