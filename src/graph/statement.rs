//! Statements and the append-only sink they are emitted into

use super::term::{Iri, Resource, Term};
use serde::{Deserialize, Serialize};

/// A single (subject, predicate, object) fact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Resource,
    pub predicate: Iri,
    pub object: Term,
}

impl Statement {
    pub fn new(
        subject: impl Into<Resource>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> ", self.subject, self.predicate)?;
        match &self.object {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(id) => write!(f, "{}", id),
            Term::Literal(lit) => write!(f, "\"{}\"^^<{}>", lit.lexical(), lit.datatype().iri()),
        }
    }
}

/// Receiver of emitted statements.
///
/// The graph builder only ever appends; it never reads back what it emitted.
pub trait StatementSink {
    fn emit(&mut self, statement: Statement);
}

impl StatementSink for Vec<Statement> {
    fn emit(&mut self, statement: Statement) {
        self.push(statement);
    }
}
