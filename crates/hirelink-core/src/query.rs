//! SQL predicate assembly for the search endpoints.
//!
//! Builds a conjunction of independently-optional clauses (keyword,
//! location, categorical equality) with numbered `$n` placeholders. The
//! builder owns placeholder numbering: parameters are recorded in exactly
//! the order their placeholders appear in the generated text, and callers
//! bind them positionally. All caller-supplied values go through parameters,
//! never into the SQL text.

use crate::expand::Expansion;

#[derive(Debug, Default)]
pub struct SearchQuery {
    clauses: Vec<String>,
    params: Vec<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a parameter and hand back its placeholder.
    fn bind(&mut self, value: String) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// Free-text keyword clause: OR across the given columns, one bound
    /// `%keyword%` pattern per column. Blank keywords add nothing.
    pub fn keyword(&mut self, term: &str, columns: &[&str]) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        let pattern = format!("%{}%", term.to_lowercase());
        let parts: Vec<String> = columns
            .iter()
            .map(|column| {
                let placeholder = self.bind(pattern.clone());
                format!("LOWER({column}) LIKE {placeholder}")
            })
            .collect();
        self.clauses.push(format!("({})", parts.join(" OR ")));
    }

    /// Location clause: OR across one `LIKE` per expanded alias, wrapped in
    /// parentheses so it ANDs cleanly with the other clauses. An unmatched
    /// expansion emits no clause at all: "no filter" stays semantically
    /// distinct from "filter matching everything".
    pub fn location(&mut self, expansion: &Expansion) {
        if !expansion.matched || expansion.aliases.is_empty() {
            return;
        }
        let parts: Vec<String> = expansion
            .aliases
            .iter()
            .map(|alias| {
                let placeholder = self.bind(format!("%{alias}%"));
                format!("LOWER(location) LIKE {placeholder}")
            })
            .collect();
        self.clauses.push(format!("({})", parts.join(" OR ")));
    }

    /// Categorical equality clause with a bound value.
    pub fn equals(&mut self, column: &str, value: &str) {
        let placeholder = self.bind(value.to_string());
        self.clauses.push(format!("{column} = {placeholder}"));
    }

    /// The assembled clauses as an ` AND ...` suffix for a base query that
    /// already has a WHERE, or an empty string when no clause was added.
    pub fn and_where(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" AND {}", self.clauses.join(" AND "))
        }
    }

    /// Bound parameters, in placeholder order.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}
