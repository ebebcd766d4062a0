//! Mapping from graph statements to oxigraph triples

use super::SerializeError;
use crate::graph::{Datatype, Literal, Resource, Statement, Term};
use oxigraph::model::{self as ox, BlankNode, NamedNode, NamedOrBlankNode, Triple};
use std::borrow::Cow;

/// Checked conversion of one statement.
///
/// With `xml_safe` set, characters XML 1.0 cannot carry are dropped from
/// literal values.
pub(super) fn triple(statement: &Statement, xml_safe: bool) -> Result<Triple, SerializeError> {
    Ok(Triple::new(
        resource(&statement.subject)?,
        named_node(statement.predicate.as_str())?,
        term(&statement.object, xml_safe)?,
    ))
}

pub(super) fn named_node(iri: &str) -> Result<NamedNode, SerializeError> {
    NamedNode::new(iri).map_err(|e| SerializeError::InvalidIri {
        iri: iri.to_string(),
        reason: e.to_string(),
    })
}

fn blank_node(label: &str) -> Result<BlankNode, SerializeError> {
    BlankNode::new(label).map_err(|e| SerializeError::InvalidBlankNode {
        label: label.to_string(),
        reason: e.to_string(),
    })
}

fn resource(resource: &Resource) -> Result<NamedOrBlankNode, SerializeError> {
    Ok(match resource {
        Resource::Iri(iri) => named_node(iri.as_str())?.into(),
        Resource::Blank(id) => blank_node(id.as_str())?.into(),
    })
}

fn term(term: &Term, xml_safe: bool) -> Result<ox::Term, SerializeError> {
    Ok(match term {
        Term::Iri(iri) => named_node(iri.as_str())?.into(),
        Term::Blank(id) => blank_node(id.as_str())?.into(),
        Term::Literal(lit) => literal(lit, xml_safe).into(),
    })
}

fn literal(lit: &Literal, xml_safe: bool) -> ox::Literal {
    let value = if xml_safe {
        strip_xml_forbidden(lit.lexical())
    } else {
        Cow::Borrowed(lit.lexical())
    };
    match lit.datatype() {
        Datatype::String => ox::Literal::new_simple_literal(value),
        // datatype IRIs are fixed XSD constants
        dt => ox::Literal::new_typed_literal(value, NamedNode::new_unchecked(dt.iri())),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn strip_xml_forbidden(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        Cow::Borrowed(value)
    } else {
        tracing::warn!(value, "dropping characters XML cannot represent");
        Cow::Owned(value.chars().filter(|c| is_xml_char(*c)).collect())
    }
}
