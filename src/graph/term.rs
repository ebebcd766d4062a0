//! Terms of an RDF statement: IRIs, blank nodes and typed literals

use super::vocab;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lexical form used for `xsd:date` literals
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lexical form used for `xsd:dateTime` literals (ISO-8601 local time)
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An absolute IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Label of a blank node, unique within one graph (e.g. `b0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlankId(String);

impl BlankId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// Datatypes a literal can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    String,
    Date,
    DateTime,
    Boolean,
    Decimal,
}

impl Datatype {
    /// Full XSD IRI of the datatype
    pub fn iri(&self) -> &'static str {
        match self {
            Self::String => vocab::XSD_STRING,
            Self::Date => vocab::XSD_DATE,
            Self::DateTime => vocab::XSD_DATE_TIME,
            Self::Boolean => vocab::XSD_BOOLEAN,
            Self::Decimal => vocab::XSD_DECIMAL,
        }
    }
}

/// A literal value with its lexical form and datatype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: Datatype,
}

impl Literal {
    /// Plain string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: Datatype::String,
        }
    }

    pub fn date(value: NaiveDate) -> Self {
        Self {
            lexical: value.format(DATE_FORMAT).to_string(),
            datatype: Datatype::Date,
        }
    }

    pub fn date_time(value: NaiveDateTime) -> Self {
        Self {
            lexical: value.format(DATE_TIME_FORMAT).to_string(),
            datatype: Datatype::DateTime,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Datatype::Boolean,
        }
    }

    pub fn decimal(value: f64) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Datatype::Decimal,
        }
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }
}

/// The subject position of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Resource {
    Iri(Iri),
    Blank(BlankId),
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{}>", iri),
            Self::Blank(id) => write!(f, "{}", id),
        }
    }
}

impl From<Iri> for Resource {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<BlankId> for Resource {
    fn from(id: BlankId) -> Self {
        Self::Blank(id)
    }
}

/// The object position of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Term {
    Iri(Iri),
    Blank(BlankId),
    Literal(Literal),
}

impl Term {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<Resource> for Term {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Iri(iri) => Self::Iri(iri),
            Resource::Blank(id) => Self::Blank(id),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}
