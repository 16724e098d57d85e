//! Keyword relevance scoring for manpower search results.
//!
//! Layered on top of the SQL ordering: when a keyword filter is present,
//! rows are re-sorted by an integer score, stably, so equal-score rows keep
//! their newest-first ordering from the store.

use crate::text::contains_folded;

/// Score contribution for a keyword hit in the primary title field.
pub const TITLE_WEIGHT: i32 = 3;
/// Score contribution for a keyword hit in the free-text description.
pub const DESCRIPTION_WEIGHT: i32 = 2;

/// Score a row against a keyword: +3 for a title hit, +2 for a description
/// hit, additive. A blank keyword scores everything 0.
pub fn relevance_score(keyword: &str, title: Option<&str>, description: Option<&str>) -> i32 {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return 0;
    }
    let mut score = 0;
    if title.is_some_and(|t| contains_folded(t, keyword)) {
        score += TITLE_WEIGHT;
    }
    if description.is_some_and(|d| contains_folded(d, keyword)) {
        score += DESCRIPTION_WEIGHT;
    }
    score
}

/// Stable descending sort by score. Ties preserve the incoming order.
pub fn sort_by_relevance<T>(items: &mut [T], score: impl Fn(&T) -> i32) {
    items.sort_by_key(|item| std::cmp::Reverse(score(item)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_outranks_description() {
        let title_hit = relevance_score("electrician", Some("Senior Electrician"), Some("wiring"));
        let description_hit =
            relevance_score("electrician", Some("Technician"), Some("certified electrician"));
        assert_eq!(title_hit, TITLE_WEIGHT);
        assert_eq!(description_hit, DESCRIPTION_WEIGHT);
        assert!(title_hit > description_hit);
    }

    #[test]
    fn hits_in_both_fields_are_additive() {
        let score = relevance_score(
            "welder",
            Some("TIG Welder"),
            Some("arc welder with 10 years experience"),
        );
        assert_eq!(score, TITLE_WEIGHT + DESCRIPTION_WEIGHT);
    }

    #[test]
    fn no_hit_scores_zero() {
        assert_eq!(relevance_score("plumber", Some("Welder"), None), 0);
        assert_eq!(relevance_score("", Some("Welder"), Some("welder")), 0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            relevance_score("ELECTRICIAN", Some("electrician"), None),
            TITLE_WEIGHT
        );
    }

    #[test]
    fn sort_is_stable_and_descending() {
        let mut rows = vec![("a", 2), ("b", 5), ("c", 2), ("d", 0)];
        sort_by_relevance(&mut rows, |row| row.1);
        let order: Vec<&str> = rows.iter().map(|r| r.0).collect();
        assert_eq!(order, ["b", "a", "c", "d"]);
    }
}
