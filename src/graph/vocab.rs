//! Fixed vocabulary: namespaces, classes and properties
//!
//! Classes and properties live in the `lkt` namespace. Instance IRIs never
//! do; they live in the per-run local namespace built by [`local_namespace`].

use std::path::Path;

macro_rules! lkt {
    ($local:literal) => {
        concat!("http://g-node.org/orcid/0000-0003-4857-1083/lkt/", $local)
    };
}

macro_rules! rdf {
    ($local:literal) => {
        concat!("http://www.w3.org/1999/02/22-rdf-syntax-ns#", $local)
    };
}

macro_rules! rdfs {
    ($local:literal) => {
        concat!("http://www.w3.org/2000/01/rdf-schema#", $local)
    };
}

macro_rules! xsd {
    ($local:literal) => {
        concat!("http://www.w3.org/2001/XMLSchema#", $local)
    };
}

macro_rules! foaf {
    ($local:literal) => {
        concat!("http://xmlns.com/foaf/0.1/", $local)
    };
}

macro_rules! dc {
    ($local:literal) => {
        concat!("http://purl.org/dc/terms/", $local)
    };
}

pub const LKT_NS: &str = lkt!("");
pub const RDF_NS: &str = rdf!("");
pub const RDFS_NS: &str = rdfs!("");
pub const XSD_NS: &str = xsd!("");
pub const FOAF_NS: &str = foaf!("");
pub const DC_NS: &str = dc!("");

/// Prefixes declared by every serializer that supports them, in output order
pub const PREFIXES: &[(&str, &str)] = &[
    ("rdf", RDF_NS),
    ("rdfs", RDFS_NS),
    ("xs", XSD_NS),
    ("foaf", FOAF_NS),
    ("dc", DC_NS),
    ("lkt", LKT_NS),
];

pub const RDF_TYPE: &str = rdf!("type");
pub const RDFS_LABEL: &str = rdfs!("label");
pub const RDFS_COMMENT: &str = rdfs!("comment");
pub const RDFS_SUB_CLASS_OF: &str = rdfs!("subClassOf");

pub const XSD_STRING: &str = xsd!("string");
pub const XSD_DATE: &str = xsd!("date");
pub const XSD_DATE_TIME: &str = xsd!("dateTime");
pub const XSD_BOOLEAN: &str = xsd!("boolean");
pub const XSD_DECIMAL: &str = xsd!("decimal");

pub const FOAF_NAME: &str = foaf!("name");
pub const FOAF_PERSON: &str = foaf!("Person");

pub const DC_SOURCE: &str = dc!("source");
pub const DC_CREATED: &str = dc!("created");
pub const DC_SUBJECT: &str = dc!("subject");

// Classes
pub const PROVENANCE: &str = lkt!("Provenance");
pub const SUBJECT: &str = lkt!("Subject");
pub const PERMIT: &str = lkt!("Permit");
pub const PROJECT: &str = lkt!("Project");
pub const EXPERIMENTER: &str = lkt!("Experimenter");
pub const EXPERIMENT: &str = lkt!("Experiment");
pub const SUBJECT_LOG_ENTRY: &str = lkt!("SubjectLogEntry");

// Properties
pub const HAS_PROVENANCE: &str = lkt!("hasProvenance");
pub const HAS_SUBJECT_ID: &str = lkt!("hasSubjectID");
pub const HAS_SEX: &str = lkt!("hasSex");
pub const HAS_BIRTH_DATE: &str = lkt!("hasBirthDate");
pub const HAS_WITHDRAWAL_DATE: &str = lkt!("hasWithdrawalDate");
pub const HAS_SPECIES_NAME: &str = lkt!("hasSpeciesName");
pub const HAS_SCIENTIFIC_NAME: &str = lkt!("hasScientificName");
pub const HAS_PERMIT: &str = lkt!("hasPermit");
pub const HAS_NUMBER: &str = lkt!("hasNumber");
pub const HAS_EXPERIMENT: &str = lkt!("hasExperiment");
pub const HAS_EXPERIMENTER: &str = lkt!("hasExperimenter");
pub const HAS_SUBJECT: &str = lkt!("hasSubject");
pub const HAS_SUBJECT_LOG_ENTRY: &str = lkt!("hasSubjectLogEntry");
pub const STARTED_AT: &str = lkt!("startedAt");
pub const HAS_PARADIGM: &str = lkt!("hasParadigm");
pub const HAS_PARADIGM_SPECIFICS: &str = lkt!("hasParadigmSpecifics");
pub const HAS_DIET: &str = lkt!("hasDiet");
pub const HAS_INITIAL_WEIGHT_DATE: &str = lkt!("hasInitialWeightDate");
pub const HAS_WEIGHT: &str = lkt!("hasWeight");
pub const HAS_VALUE: &str = lkt!("hasValue");
pub const HAS_UNIT: &str = lkt!("hasUnit");
pub const HAS_FEED: &str = lkt!("hasFeed");

/// Fixed description attached to every provenance record
pub const PROVENANCE_DESCRIPTION: &str =
    "This RDF file was created by parsing data from the file indicated in the source literal";

/// Build the local namespace for instance IRIs from the output file path.
///
/// The path is made absolute without touching the filesystem, so the output
/// file does not need to exist yet. Backslashes become `/`; characters that
/// may not appear in an IRI path are percent-encoded.
pub fn local_namespace(output: &Path) -> String {
    let absolute = std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf());
    let mut path = String::new();
    for c in absolute.to_string_lossy().chars() {
        match c {
            '\\' => path.push('/'),
            c if needs_escape(c) => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    path.push_str(&format!("%{:02X}", byte));
                }
            }
            c => path.push(c),
        }
    }
    format!("{}{}/", LKT_NS, path).replace("lkt//", "lkt/")
}

fn needs_escape(c: char) -> bool {
    c.is_control()
        || c.is_whitespace()
        || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '%' | '#' | '?')
}
