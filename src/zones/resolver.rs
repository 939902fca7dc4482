//! Zone resolution.
//!
//! # Responsibilities
//! - Order active zones by priority
//! - Find the first zone with a pattern matching the postal code
//! - Report which pattern decided the match
//!
//! # Design Decisions
//! - Stable sort on an `i32` key: ties keep the order the store supplied
//! - First match wins; scanning stops at the first matching pattern
//! - Inactive zones are dropped before sorting and can never be selected

use crate::zones::pattern::PincodePattern;
use crate::zones::types::Zone;

/// A resolved zone together with the pattern that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneMatch<'a> {
    pub zone: &'a Zone,
    pub pattern: &'a PincodePattern,
}

/// Active zones in evaluation order.
pub fn candidates(zones: &[Zone]) -> Vec<&Zone> {
    let mut active: Vec<&Zone> = zones.iter().filter(|z| z.is_active).collect();
    active.sort_by_key(|z| z.priority);
    active
}

/// Resolve `code` to the highest-priority matching zone and pattern.
///
/// `code` must be non-empty; callers validate input shape.
pub fn resolve_match<'a>(zones: &'a [Zone], code: &str) -> Option<ZoneMatch<'a>> {
    candidates(zones)
        .into_iter()
        .find_map(|zone| zone.matching_pattern(code).map(|pattern| ZoneMatch { zone, pattern }))
}

/// Resolve `code` to the highest-priority matching zone.
pub fn resolve<'a>(zones: &'a [Zone], code: &str) -> Option<&'a Zone> {
    resolve_match(zones, code).map(|m| m.zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: &str, priority: i32, patterns: &[&str]) -> Zone {
        Zone::new(id, id.to_uppercase(), 100.0)
            .with_patterns(patterns.iter().copied())
            .with_priority(priority)
    }

    #[test]
    fn test_lower_priority_value_wins() {
        let zones = vec![zone("low", 5, &["400001"]), zone("high", 1, &["400001"])];
        assert_eq!(resolve(&zones, "400001").map(|z| z.id.as_str()), Some("high"));

        let reversed: Vec<Zone> = zones.into_iter().rev().collect();
        assert_eq!(resolve(&reversed, "400001").map(|z| z.id.as_str()), Some("high"));
    }

    #[test]
    fn test_equal_priority_keeps_supplied_order() {
        let zones = vec![zone("first", 3, &["4000*"]), zone("second", 3, &["400001"])];
        assert_eq!(resolve(&zones, "400001").map(|z| z.id.as_str()), Some("first"));
    }

    #[test]
    fn test_inactive_zone_never_selected() {
        let zones = vec![
            zone("off", 1, &["400001"]).inactive(),
            zone("on", 10, &["400*"]),
        ];
        assert_eq!(resolve(&zones, "400001").map(|z| z.id.as_str()), Some("on"));

        let only_inactive = vec![zone("off", 1, &["*"]).inactive()];
        assert!(resolve(&only_inactive, "400001").is_none());
    }

    #[test]
    fn test_no_match_returns_none() {
        let zones = vec![zone("a", 1, &["400001-400100"]), zone("b", 2, &["abc-xyz"])];
        assert!(resolve(&zones, "999999").is_none());
        assert!(resolve(&[], "400001").is_none());
    }

    #[test]
    fn test_first_matching_pattern_is_reported() {
        let zones = vec![zone("a", 1, &["110*", "400001-400100", "4000*"])];
        let m = resolve_match(&zones, "400050").unwrap();
        assert_eq!(m.zone.id, "a");
        assert_eq!(m.pattern.as_str(), "400001-400100");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let zones = vec![
            zone("a", 2, &["5601*"]),
            zone("b", 2, &["560100-560200"]),
            zone("c", 1, &["411*"]),
        ];
        let first = resolve(&zones, "560150").map(|z| z.id.clone());
        for _ in 0..50 {
            assert_eq!(resolve(&zones, "560150").map(|z| z.id.clone()), first);
        }
        assert_eq!(first.as_deref(), Some("a"));
    }

    #[test]
    fn test_candidates_order() {
        let zones = vec![
            zone("c", 9, &[]),
            zone("a", 1, &[]),
            zone("x", 0, &[]).inactive(),
            zone("b", 1, &[]),
        ];
        let order: Vec<&str> = candidates(&zones).iter().map(|z| z.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
