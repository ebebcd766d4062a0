//! Graph: the in-memory statement set produced by one conversion run

use super::statement::{Statement, StatementSink};
use super::term::{Iri, Resource, Term};
use super::vocab;

/// An ordered, append-only set of statements.
///
/// Order is emission order, which keeps serialized output reproducible for
/// identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    statements: Vec<Statement>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all statements in emission order
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Subjects declared with `rdf:type <class>`, in first-declaration order
    pub fn instances_of(&self, class: &str) -> Vec<&Resource> {
        let mut found: Vec<&Resource> = Vec::new();
        for st in self.statements.iter().filter(|st| {
            st.predicate.as_str() == vocab::RDF_TYPE
                && st.object.as_iri().map(Iri::as_str) == Some(class)
        }) {
            if !found.contains(&&st.subject) {
                found.push(&st.subject);
            }
        }
        found
    }

    /// Objects of all statements with the given subject and predicate
    pub fn objects<'a>(&'a self, subject: &'a Resource, predicate: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.statements
            .iter()
            .filter(move |st| &st.subject == subject && st.predicate.as_str() == predicate)
            .map(|st| &st.object)
    }

    /// Number of statements using the given predicate
    pub fn count_predicate(&self, predicate: &str) -> usize {
        self.statements
            .iter()
            .filter(|st| st.predicate.as_str() == predicate)
            .count()
    }

    /// Distinct subjects in first-appearance order
    pub fn subjects(&self) -> Vec<&Resource> {
        let mut seen = std::collections::HashSet::new();
        self.statements
            .iter()
            .map(|st| &st.subject)
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

impl StatementSink for Graph {
    fn emit(&mut self, statement: Statement) {
        self.statements.push(statement);
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
