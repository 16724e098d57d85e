//! The location registry model.
//!
//! The registry is a forest of named geographic nodes: countries at the top,
//! states/regions below them, cities as leaves. Countries with a flat
//! national hierarchy (city-states such as the UAE emirates) may carry
//! cities directly without an intermediate state layer.
//!
//! The registry is static configuration data: built once at process start
//! from a JSON dataset, immutable afterwards, shared read-only across
//! requests.

use crate::error::{RegistryError, Result};
use crate::text::fold_key;
use serde::Deserialize;
use std::collections::HashSet;

/// The level a node occupies in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Country,
    State,
    City,
}

/// A leaf node. Cities have no children but may still carry aliases
/// (spelling variants, neighbourhoods, colloquial names).
#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A state or region, holding its cities.
#[derive(Debug, Clone, Deserialize)]
pub struct State {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub cities: Vec<City>,
}

/// A country. States and directly-attached cities are both descendants for
/// expansion purposes.
#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub cities: Vec<City>,
}

/// Top-level registry structure.
///
/// Constructed by the loader module from the bundled JSON dataset (or a
/// caller-supplied file) and validated on construction: every key must be
/// unique across the whole forest.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRegistry {
    pub countries: Vec<Country>,
}

/// Simple aggregate statistics for the registry.
#[derive(Debug, Clone, Copy)]
pub struct RegistryStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}

impl City {
    /// The node's full alias set: the canonical key followed by every
    /// registered alias. Lookups must succeed on the key even when the
    /// dataset lists no explicit alias for it.
    pub fn alias_set(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl State {
    pub fn alias_set(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl Country {
    pub fn alias_set(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.key.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl LocationRegistry {
    /// Fold every key and alias, then reject duplicate keys.
    ///
    /// Alias collisions across nodes are tolerated (expansion resolves them
    /// to the first node in registry iteration order); duplicate canonical
    /// keys are a dataset bug and refuse to load.
    pub(crate) fn normalize_and_validate(mut self) -> Result<Self> {
        fn fold_all(key: &mut String, aliases: &mut [String]) {
            *key = fold_key(key);
            for alias in aliases {
                *alias = fold_key(alias);
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut check = |key: &str| -> Result<()> {
            if !seen.insert(key.to_string()) {
                return Err(RegistryError::DuplicateKey(key.to_string()));
            }
            Ok(())
        };

        for country in &mut self.countries {
            fold_all(&mut country.key, &mut country.aliases);
            check(&country.key)?;
            for state in &mut country.states {
                fold_all(&mut state.key, &mut state.aliases);
                check(&state.key)?;
                for city in &mut state.cities {
                    fold_all(&mut city.key, &mut city.aliases);
                    check(&city.key)?;
                }
            }
            for city in &mut country.cities {
                fold_all(&mut city.key, &mut city.aliases);
                check(&city.key)?;
            }
        }
        Ok(self)
    }

    pub fn stats(&self) -> RegistryStats {
        let states = self.countries.iter().map(|c| c.states.len()).sum();
        let cities = self
            .countries
            .iter()
            .map(|c| {
                c.cities.len()
                    + c.states.iter().map(|s| s.cities.len()).sum::<usize>()
            })
            .sum();
        RegistryStats {
            countries: self.countries.len(),
            states,
            cities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_from(json: &str) -> Result<LocationRegistry> {
        let registry: LocationRegistry = serde_json::from_str(json)?;
        registry.normalize_and_validate()
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = registry_from(
            r#"{"countries":[
                {"key":"india","states":[
                    {"key":"tamil nadu","cities":[{"key":"salem"}]},
                    {"key":"karnataka","cities":[{"key":"salem"}]}
                ]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKey(key) if key == "salem"));
    }

    #[test]
    fn keys_and_aliases_are_folded() {
        let registry = registry_from(
            r#"{"countries":[{"key":"  India ","aliases":["BHARAT"],"cities":[{"key":"Delhi"}]}]}"#,
        )
        .unwrap();
        let country = &registry.countries[0];
        assert_eq!(country.key, "india");
        assert_eq!(country.aliases, vec!["bharat"]);
        assert_eq!(country.cities[0].key, "delhi");
    }

    #[test]
    fn stats_count_all_levels() {
        let registry = registry_from(
            r#"{"countries":[
                {"key":"india","states":[{"key":"tamil nadu","cities":[{"key":"chennai"},{"key":"salem"}]}]},
                {"key":"uae","cities":[{"key":"dubai"}]}
            ]}"#,
        )
        .unwrap();
        let stats = registry.stats();
        assert_eq!(stats.countries, 2);
        assert_eq!(stats.states, 1);
        assert_eq!(stats.cities, 3);
    }
}
