//! Graph data model: terms, statements, sinks and the fixed vocabulary

mod set;
mod statement;
mod term;
pub mod vocab;

pub use set::Graph;
pub use statement::{Statement, StatementSink};
pub use term::{BlankId, Datatype, Iri, Literal, Resource, Term};
