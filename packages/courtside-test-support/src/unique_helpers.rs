//! Unique identifiers so tests sharing a store directory never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use courtside_test_support::unique_helpers::unique_id;
///
/// let a = unique_id("match");
/// let b = unique_id("match");
/// assert_ne!(a, b);
/// assert!(a.starts_with("match-"));
/// ```
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
