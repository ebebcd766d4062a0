//! Serialization sink: encodes a graph in one of the supported RDF formats
//! and writes it to disk.
//!
//! Encoding goes through oxigraph's serializers and happens entirely in
//! memory. The file is then written through a temporary file in the target
//! directory and renamed into place, so a failed run never leaves a partial
//! output file behind.

mod terms;

use crate::graph::{vocab, Graph};
use oxigraph::io::{RdfFormat as OxFormat, RdfSerializer};
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Format names accepted on the command line, in display order
pub const SUPPORTED_FORMATS: [&str; 4] = ["TTL", "RDF/XML", "NTRIPLES", "JSON-LD"];

/// Errors raised while encoding or writing a graph
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("invalid IRI <{iri}>: {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("invalid blank node label '{label}': {reason}")]
    InvalidBlankNode { label: String, reason: String },

    #[error("no RDF serializer available for {0}")]
    UnavailableFormat(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RdfFormat {
    #[default]
    Turtle,
    RdfXml,
    NTriples,
    JsonLd,
}

impl RdfFormat {
    /// Name of the format as accepted by [`str::parse`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Turtle => "TTL",
            Self::RdfXml => "RDF/XML",
            Self::NTriples => "NTRIPLES",
            Self::JsonLd => "JSON-LD",
        }
    }

    /// File extension used when deriving output file names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Turtle => "ttl",
            Self::RdfXml => "rdf",
            Self::NTriples => "nt",
            Self::JsonLd => "jsonld",
        }
    }
}

impl RdfFormat {
    fn backend(self) -> Result<OxFormat, SerializeError> {
        match self {
            Self::Turtle => Ok(OxFormat::Turtle),
            Self::RdfXml => Ok(OxFormat::RdfXml),
            Self::NTriples => Ok(OxFormat::NTriples),
            Self::JsonLd => OxFormat::from_extension(self.extension())
                .ok_or(SerializeError::UnavailableFormat(self.name())),
        }
    }
}

impl std::fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for RdfFormat {
    type Err = crate::error::ConvertError;

    /// Case-insensitive match against [`SUPPORTED_FORMATS`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TTL" => Ok(Self::Turtle),
            "RDF/XML" => Ok(Self::RdfXml),
            "NTRIPLES" => Ok(Self::NTriples),
            "JSON-LD" => Ok(Self::JsonLd),
            _ => Err(crate::error::ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Check that `iri` can be written as an IRI in every supported format.
pub fn check_iri(iri: &str) -> Result<(), SerializeError> {
    terms::named_node(iri).map(|_| ())
}

/// Encode a graph. In Turtle, `local_ns` is declared as the empty prefix.
pub fn serialize(graph: &Graph, format: RdfFormat, local_ns: Option<&str>) -> Result<String, SerializeError> {
    let mut serializer = RdfSerializer::from_format(format.backend()?);
    for (prefix, ns) in vocab::PREFIXES {
        serializer = with_prefix(serializer, prefix, ns)?;
    }
    if let (RdfFormat::Turtle, Some(ns)) = (format, local_ns) {
        serializer = with_prefix(serializer, "", ns)?;
    }

    let xml_safe = format == RdfFormat::RdfXml;
    let mut writer = serializer.for_writer(Vec::new());
    for statement in graph {
        writer.serialize_triple(&terms::triple(statement, xml_safe)?)?;
    }
    let encoded = writer.finish()?;
    debug!(%format, statements = graph.len(), bytes = encoded.len(), "graph encoded");

    String::from_utf8(encoded).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn with_prefix(serializer: RdfSerializer, prefix: &str, ns: &str) -> Result<RdfSerializer, SerializeError> {
    serializer
        .with_prefix(prefix, ns)
        .map_err(|e| SerializeError::InvalidIri {
            iri: ns.to_string(),
            reason: e.to_string(),
        })
}

/// Encode a graph and write it to `path`, replacing any existing file.
pub fn write_graph(
    path: &Path,
    graph: &Graph,
    format: RdfFormat,
    local_ns: Option<&str>,
) -> Result<(), SerializeError> {
    let encoded = serialize(graph, format, local_ns)?;

    info!(path = %path.display(), %format, "writing data to RDF file");
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(encoded.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
