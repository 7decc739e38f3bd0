//! # URI Restriction Scenarios
//!
//! The four named restriction cases, plus the memoised path a router takes
//! when the same (topic, permission) pair arrives repeatedly.

#[cfg(test)]
mod tests {
    use bw_uri::{analyze, fingerprint, matches, restrict_by, RestrictionCache, Uri, UriError};

    // =========================================================================
    // NAMED SCENARIOS
    // =========================================================================

    #[test]
    fn scenario_1_left_star_absorbs() {
        assert_eq!(restrict_by("a/*", "a/b/c").unwrap(), "a/b/c");
    }

    #[test]
    fn scenario_2_both_stars() {
        assert_eq!(
            restrict_by("a/b/*/x/y", "a/b/c/d/*/y").unwrap(),
            "a/b/c/d/*/x/y"
        );
    }

    #[test]
    fn scenario_3_plus_binding() {
        assert_eq!(restrict_by("a/+/c", "a/b/c").unwrap(), "a/b/c");
    }

    #[test]
    fn scenario_4_no_intersection() {
        let err = restrict_by("a/b/c/*/x/y/z", "a/b/1/*/2/y/z").unwrap_err();
        assert!(matches!(err, UriError::NoIntersection { .. }));
    }

    // =========================================================================
    // RESTRICTION AGAINST CONCRETE TOPICS
    // =========================================================================

    #[test]
    fn test_restricted_pattern_covers_only_shared_topics() {
        let granted = restrict_by("castle/*", "castle/+/temp").unwrap();
        assert_eq!(granted, "castle/+/temp");

        assert!(matches(&granted, "castle/kitchen/temp"));
        assert!(!matches(&granted, "castle/kitchen/humidity"));
        assert!(!matches(&granted, "castle/temp"));

        let uri = Uri::parse(&granted).unwrap();
        assert!(uri.has_plus());
        assert!(!uri.is_concrete());
    }

    #[test]
    fn test_invalid_inputs_are_rejected_before_restriction() {
        assert!(!analyze("a//b").valid);
        assert!(matches!(
            restrict_by("a//b", "a/b"),
            Err(UriError::InvalidUri { .. })
        ));
        assert!(matches!(
            restrict_by("a/b", "*/x/*"),
            Err(UriError::InvalidUri { .. })
        ));
    }

    // =========================================================================
    // CACHE
    // =========================================================================

    #[test]
    fn test_cache_agrees_with_direct_restriction() {
        let cache = RestrictionCache::new(16).unwrap();
        let pairs = [
            ("a/*", "a/b/c"),
            ("a/b/*/x/y", "a/b/c/d/*/y"),
            ("a/+/c", "a/b/c"),
            ("a/b/c/*/x/y/z", "a/b/1/*/2/y/z"),
        ];

        for _ in 0..3 {
            for (from, by) in pairs {
                assert_eq!(cache.restrict(from, by), restrict_by(from, by));
            }
        }

        let stats = cache.stats();
        assert_eq!(stats.misses, 4);
        assert_eq!(stats.hits, 8);
        assert_eq!(stats.entries, 4);
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        assert_ne!(fingerprint("a/b", "c"), fingerprint("c", "a/b"));
        assert_ne!(fingerprint("a/b", "c"), fingerprint("a", "b/c"));
    }
}
