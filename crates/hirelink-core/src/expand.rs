//! Hierarchical location expansion.
//!
//! Turns one user-supplied location string into the full set of aliases that
//! should be OR-matched against stored free-text location values. A country
//! hit expands to every descendant alias at every level; a state hit expands
//! to its own aliases plus its cities'; a city hit stays at the city, since
//! searching "chennai" must not also match sibling cities in the same state.
//!
//! Matching is exact on folded keys and aliases; substring behavior is the
//! downstream `LIKE '%alias%'` comparison's job, not this layer's.

use crate::model::{City, Country, LocationRegistry, NodeKind, State};
use crate::text::fold_key;
use std::collections::HashSet;
use tracing::debug;

/// Result of expanding a location query.
///
/// `matched = false` means "no location filter at all" (empty input), which
/// callers must keep distinct from a filter that matches everything.
/// Aliases are deduplicated and in deterministic first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub matched: bool,
    pub aliases: Vec<String>,
}

impl Expansion {
    /// The empty expansion: no filter requested.
    pub fn none() -> Self {
        Self {
            matched: false,
            aliases: Vec::new(),
        }
    }
}

/// A matched node, borrowed from the registry.
enum NodeRef<'a> {
    Country(&'a Country),
    State(&'a State),
    City(&'a City),
}

impl NodeRef<'_> {
    fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Country(_) => NodeKind::Country,
            NodeRef::State(_) => NodeKind::State,
            NodeRef::City(_) => NodeKind::City,
        }
    }

    fn key(&self) -> &str {
        match self {
            NodeRef::Country(c) => &c.key,
            NodeRef::State(s) => &s.key,
            NodeRef::City(c) => &c.key,
        }
    }
}

/// Accumulates aliases, dropping duplicates while preserving first-seen order.
#[derive(Default)]
struct AliasSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl AliasSet {
    fn extend<'a>(&mut self, aliases: impl Iterator<Item = &'a str>) {
        for alias in aliases {
            if self.seen.insert(alias.to_string()) {
                self.ordered.push(alias.to_string());
            }
        }
    }
}

impl LocationRegistry {
    /// Expand a free-text location query into its full alias set.
    ///
    /// Empty or whitespace-only input yields `matched = false`. Unknown
    /// place names degrade to a single literal alias rather than failing;
    /// search must never hard-fail on unrecognized geography.
    pub fn expand(&self, query: &str) -> Expansion {
        let needle = fold_key(query);
        if needle.is_empty() {
            return Expansion::none();
        }

        // Exact key match takes priority over alias membership; both walk
        // the forest in registry iteration order so alias collisions resolve
        // to the first node deterministically.
        let hit = self
            .find(|key, _| key == needle)
            .or_else(|| self.find(|_, aliases| aliases.iter().any(|a| a == &needle)));

        match hit {
            Some(node) => {
                let expansion = self.expand_node(&node);
                debug!(
                    query = %needle,
                    key = node.key(),
                    kind = ?node.kind(),
                    aliases = expansion.aliases.len(),
                    "expanded location query"
                );
                expansion
            }
            None => {
                // Unknown place name typed by a user: keep it as the sole
                // alias so downstream substring search still works.
                debug!(query = %needle, "location not in registry, using literal");
                Expansion {
                    matched: true,
                    aliases: vec![needle],
                }
            }
        }
    }

    /// Depth-first walk over the forest, returning the first node whose
    /// (key, aliases) satisfies the predicate.
    fn find(&self, pred: impl Fn(&str, &[String]) -> bool) -> Option<NodeRef<'_>> {
        for country in &self.countries {
            if pred(&country.key, &country.aliases) {
                return Some(NodeRef::Country(country));
            }
            for state in &country.states {
                if pred(&state.key, &state.aliases) {
                    return Some(NodeRef::State(state));
                }
                for city in &state.cities {
                    if pred(&city.key, &city.aliases) {
                        return Some(NodeRef::City(city));
                    }
                }
            }
            for city in &country.cities {
                if pred(&city.key, &city.aliases) {
                    return Some(NodeRef::City(city));
                }
            }
        }
        None
    }

    fn expand_node(&self, node: &NodeRef<'_>) -> Expansion {
        let mut set = AliasSet::default();
        match node {
            NodeRef::Country(country) => {
                set.extend(country.alias_set());
                for state in &country.states {
                    set.extend(state.alias_set());
                    for city in &state.cities {
                        set.extend(city.alias_set());
                    }
                }
                for city in &country.cities {
                    set.extend(city.alias_set());
                }
            }
            NodeRef::State(state) => {
                set.extend(state.alias_set());
                for city in &state.cities {
                    set.extend(city.alias_set());
                }
            }
            NodeRef::City(city) => set.extend(city.alias_set()),
        }
        Expansion {
            matched: true,
            aliases: set.ordered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> LocationRegistry {
        LocationRegistry::load().unwrap()
    }

    fn aliases(query: &str) -> Vec<String> {
        registry().expand(query).aliases
    }

    #[test]
    fn empty_and_whitespace_do_not_match() {
        assert_eq!(registry().expand(""), Expansion::none());
        assert_eq!(registry().expand("   "), Expansion::none());
    }

    #[test]
    fn unknown_location_falls_back_to_literal() {
        let expansion = registry().expand("  Atlantis ");
        assert!(expansion.matched);
        assert_eq!(expansion.aliases, vec!["atlantis"]);
    }

    #[test]
    fn country_expansion_is_transitive() {
        let india = aliases("india");
        for descendant in ["chennai", "mumbai", "bangalore", "delhi"] {
            assert!(india.contains(&descendant.to_string()), "missing {descendant}");
        }
        // City-level aliases must be materialized too, not just keys.
        assert!(india.contains(&"madras".to_string()));
        assert!(india.contains(&"bombay".to_string()));
    }

    #[test]
    fn country_expansion_covers_every_descendant_alias_set() {
        let registry = registry();
        for country in &registry.countries {
            let expanded: HashSet<String> =
                registry.expand(&country.key).aliases.into_iter().collect();
            for state in &country.states {
                for city in &state.cities {
                    for alias in city.alias_set() {
                        assert!(
                            expanded.contains(alias),
                            "{} missing descendant alias {alias}",
                            country.key
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn state_expansion_does_not_leak_across_branches() {
        let tamil_nadu = aliases("tamil nadu");
        assert!(tamil_nadu.contains(&"chennai".to_string()));
        assert!(tamil_nadu.contains(&"coimbatore".to_string()));
        assert!(!tamil_nadu.contains(&"mumbai".to_string()));
        assert!(!tamil_nadu.contains(&"bangalore".to_string()));
    }

    #[test]
    fn state_expansion_is_exactly_own_plus_child_cities() {
        let registry = registry();
        for country in &registry.countries {
            for state in &country.states {
                let mut expected: Vec<String> = Vec::new();
                let mut seen = HashSet::new();
                for alias in state
                    .alias_set()
                    .chain(state.cities.iter().flat_map(|c| c.alias_set()))
                {
                    if seen.insert(alias) {
                        expected.push(alias.to_string());
                    }
                }
                assert_eq!(registry.expand(&state.key).aliases, expected);
            }
        }
    }

    #[test]
    fn city_expansion_never_includes_siblings() {
        let chennai = aliases("chennai");
        assert!(chennai.contains(&"madras".to_string()));
        assert!(chennai.contains(&"velachery".to_string()));
        assert!(!chennai.contains(&"coimbatore".to_string()));
        assert!(!chennai.contains(&"tamil nadu".to_string()));
    }

    #[test]
    fn alias_lookup_resolves_to_owning_node() {
        assert_eq!(aliases("bombay"), aliases("mumbai"));
        assert_eq!(aliases("bengaluru"), aliases("bangalore"));
        assert_eq!(aliases("trichy"), aliases("tiruchirappalli"));
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        assert_eq!(aliases("  TAMIL NADU "), aliases("tamil nadu"));
        assert_eq!(aliases("Bombay"), aliases("mumbai"));
    }

    #[test]
    fn expansion_is_idempotent() {
        let registry = registry();
        for country in &registry.countries {
            let full: HashSet<String> =
                registry.expand(&country.key).aliases.into_iter().collect();
            for alias in &registry.expand(&country.key).aliases {
                let re_expanded = registry.expand(alias);
                assert!(re_expanded.matched);
                for a in &re_expanded.aliases {
                    assert!(
                        full.contains(a),
                        "re-expanding {alias} escaped the original set via {a}"
                    );
                }
            }
        }
    }

    #[test]
    fn exact_key_match_beats_alias_membership() {
        // "port city" is an alias of an earlier node and the canonical key
        // of a later one; the key pass runs first, so the later node wins.
        let registry = LocationRegistry::from_json_str(
            r#"{"countries":[
                {"key":"a","states":[
                    {"key":"s1","cities":[{"key":"c1","aliases":["port city"]}]},
                    {"key":"s2","cities":[{"key":"port city","aliases":["harbour"]}]}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            registry.expand("port city").aliases,
            vec!["port city", "harbour"]
        );
    }

    #[test]
    fn alias_collisions_resolve_to_first_node_in_iteration_order() {
        let registry = LocationRegistry::from_json_str(
            r#"{"countries":[
                {"key":"a","states":[
                    {"key":"s1","cities":[{"key":"c1","aliases":["shared"]}]},
                    {"key":"s2","cities":[{"key":"c2","aliases":["shared"]}]}
                ]}
            ]}"#,
        )
        .unwrap();
        // First matching node in depth-first order wins; the two expansions
        // are never merged.
        assert_eq!(registry.expand("shared").aliases, vec!["c1", "shared"]);
    }

    #[test]
    fn directly_attached_cities_are_country_descendants() {
        let uae = aliases("uae");
        assert!(uae.contains(&"dubai".to_string()));
        assert!(uae.contains(&"abu dhabi".to_string()));
        // And a direct city hit stays narrow.
        assert_eq!(
            aliases("dubai"),
            vec!["dubai".to_string(), "dxb".to_string()]
        );
    }

    #[test]
    fn aliases_are_deduplicated() {
        let registry = registry();
        for country in &registry.countries {
            let expansion = registry.expand(&country.key);
            let unique: HashSet<&String> = expansion.aliases.iter().collect();
            assert_eq!(unique.len(), expansion.aliases.len());
        }
    }
}
