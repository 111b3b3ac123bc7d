//! Instance size tiers
//!
//! An instance type is `family.suffix` (`m5.4xlarge`). The suffix is the size
//! tier users anchor on, so when the size list is refreshed for a new family
//! or region the resolver tries to keep the tier instead of the literal type.
//!
//! # Best-size match
//!
//! | Priority | Rule                                   |
//! |----------|----------------------------------------|
//! | 1        | Same suffix as the previous selection  |
//! | 2        | The `large` tier                       |
//! | 3        | First entry of the rank-sorted list    |

use crate::gateway::InstanceSize;

/// Fixed ordering of known size tiers. Anything not listed ranks 0.
pub const SIZE_RANKS: [(&str, u8); 20] = [
    ("nano", 1),
    ("micro", 2),
    ("small", 3),
    ("medium", 4),
    ("large", 5),
    ("xlarge", 6),
    ("2xlarge", 7),
    ("3xlarge", 8),
    ("4xlarge", 9),
    ("6xlarge", 10),
    ("8xlarge", 11),
    ("9xlarge", 12),
    ("10xlarge", 13),
    ("12xlarge", 14),
    ("16xlarge", 15),
    ("18xlarge", 16),
    ("24xlarge", 17),
    ("32xlarge", 18),
    ("48xlarge", 19),
    ("metal", 20),
];

/// Tier used when the previous tier is not offered
pub const FALLBACK_SUFFIX: &str = "large";

/// Size suffix of an instance type: the text after the last `.`.
///
/// Returns `None` for strings without a family token or without a suffix.
pub fn size_suffix(instance_type: &str) -> Option<&str> {
    match instance_type.rsplit_once('.') {
        Some((family, suffix)) if !family.is_empty() && !suffix.is_empty() => Some(suffix),
        _ => None,
    }
}

/// Rank of a suffix in [`SIZE_RANKS`], 0 when unranked.
pub fn suffix_rank(suffix: &str) -> u8 {
    SIZE_RANKS
        .iter()
        .find(|(name, _)| *name == suffix)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

/// Rank of a full instance type
pub fn type_rank(instance_type: &str) -> u8 {
    size_suffix(instance_type).map(suffix_rank).unwrap_or(0)
}

/// Sort ascending by tier rank, keeping response order for equal ranks.
pub fn sort_by_rank(sizes: &mut [InstanceSize]) {
    // sort_by_key is stable
    sizes.sort_by_key(|s| type_rank(&s.instance_type));
}

/// Which rule picked the resolved size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    SameTier,
    Fallback,
    First,
}

/// Pick the size to select from a rank-sorted list.
///
/// Returns `None` only when `sorted` is empty.
pub fn best_match<'a>(
    sorted: &'a [InstanceSize],
    previous_suffix: Option<&str>,
) -> Option<(&'a InstanceSize, MatchRule)> {
    let with_suffix = |suffix: &str| {
        sorted
            .iter()
            .find(|s| size_suffix(&s.instance_type) == Some(suffix))
    };

    if let Some(found) = previous_suffix.and_then(with_suffix) {
        return Some((found, MatchRule::SameTier));
    }
    if let Some(found) = with_suffix(FALLBACK_SUFFIX) {
        return Some((found, MatchRule::Fallback));
    }
    sorted.first().map(|s| (s, MatchRule::First))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(types: &[&str]) -> Vec<InstanceSize> {
        types.iter().map(|t| InstanceSize::new(*t)).collect()
    }

    fn names(sizes: &[InstanceSize]) -> Vec<&str> {
        sizes.iter().map(|s| s.instance_type.as_str()).collect()
    }

    #[test]
    fn suffix_is_text_after_last_dot() {
        assert_eq!(size_suffix("m5.4xlarge"), Some("4xlarge"));
        assert_eq!(size_suffix("g4dn.xlarge"), Some("xlarge"));
        assert_eq!(size_suffix("u-6tb1.metal"), Some("metal"));
        assert_eq!(size_suffix("m5"), None);
        assert_eq!(size_suffix(".large"), None);
        assert_eq!(size_suffix("m5."), None);
    }

    #[test]
    fn rank_table_bounds() {
        assert_eq!(suffix_rank("nano"), 1);
        assert_eq!(suffix_rank("metal"), 20);
        assert_eq!(suffix_rank("metal-24xl"), 0);
        assert_eq!(type_rank("m5"), 0);
    }

    #[test]
    fn sorts_by_rank() {
        let mut list = sizes(&["m5.metal", "m5.xlarge", "m5.large", "m5.24xlarge", "m5.2xlarge"]);
        sort_by_rank(&mut list);
        assert_eq!(
            names(&list),
            ["m5.large", "m5.xlarge", "m5.2xlarge", "m5.24xlarge", "m5.metal"]
        );
    }

    #[test]
    fn unranked_sort_first_and_keep_order() {
        let mut list = sizes(&["x.large", "x.weird", "x.nano", "x.odd"]);
        sort_by_rank(&mut list);
        assert_eq!(names(&list), ["x.weird", "x.odd", "x.nano", "x.large"]);
    }

    #[test]
    fn keeps_previous_tier() {
        let list = sizes(&["c6i.large", "c6i.xlarge", "c6i.4xlarge"]);
        let (chosen, rule) = best_match(&list, Some("4xlarge")).unwrap();
        assert_eq!(chosen.instance_type, "c6i.4xlarge");
        assert_eq!(rule, MatchRule::SameTier);
    }

    #[test]
    fn falls_back_to_large() {
        let list = sizes(&["c6i.large", "c6i.xlarge"]);
        let (chosen, rule) = best_match(&list, Some("metal")).unwrap();
        assert_eq!(chosen.instance_type, "c6i.large");
        assert_eq!(rule, MatchRule::Fallback);
    }

    #[test]
    fn falls_back_to_first() {
        let list = sizes(&["t3.nano", "t3.micro", "t3.xlarge"]);
        let (chosen, rule) = best_match(&list, Some("metal")).unwrap();
        assert_eq!(chosen.instance_type, "t3.nano");
        assert_eq!(rule, MatchRule::First);

        let (chosen, _) = best_match(&list, None).unwrap();
        assert_eq!(chosen.instance_type, "t3.nano");
    }

    #[test]
    fn large_does_not_match_xlarge() {
        let list = sizes(&["m5.xlarge", "m5.2xlarge"]);
        let (chosen, rule) = best_match(&list, None).unwrap();
        assert_eq!(chosen.instance_type, "m5.xlarge");
        assert_eq!(rule, MatchRule::First);
    }

    #[test]
    fn empty_list_has_no_match() {
        assert!(best_match(&[], Some("large")).is_none());
    }
}
