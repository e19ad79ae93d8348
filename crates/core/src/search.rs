//! Browse/search pagination helpers for published listings.

/// Default number of listings per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of listings per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `1..=max`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Normalized form of a make or model, stored next to the listing so
/// filters can be answered by exact match.
pub fn search_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// The key to filter on for a user-provided make/model. `None` for an
/// absent or blank filter, which matches everything.
pub fn filter_key(filter: Option<&str>) -> Option<String> {
    filter
        .map(search_key)
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 20, 100), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn filter_key_ignores_case_and_padding() {
        assert_eq!(filter_key(Some(" COROLLA ")), Some(search_key("Corolla")));
        assert_eq!(filter_key(Some("toyota")), Some(search_key("Toyota")));
        assert_ne!(filter_key(Some("Honda")), Some(search_key("Toyota")));
    }

    #[test]
    fn blank_filter_has_no_key() {
        assert_eq!(filter_key(None), None);
        assert_eq!(filter_key(Some("  ")), None);
    }
}
