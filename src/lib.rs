//! lktlog: laboratory logbook to linked data
//!
//! Converts logbook sheets (one per subject animal, one row per experiment
//! session) into a provenance-annotated RDF graph.
//!
//! # Core Concepts
//!
//! - **Sheets and entries**: validated value objects read from the logbook
//! - **Identity registry**: per-run deduplication of subjects, projects and experimenters
//! - **Graph builder**: emits typed statements, all linked to one provenance record
//! - **Serialization**: Turtle, RDF/XML, N-Triples or JSON-LD
//!
//! # Example
//!
//! ```
//! use lktlog::{gate, Entry, GraphBuilder, Sheet, ValidationPolicy};
//!
//! let sheet = Sheet::new("A1")
//!     .with_sex("f")
//!     .with_dates("01.01.2019", "01.01.2021")
//!     .with_permit("P-100")
//!     .with_species("mouse")
//!     .with_entry(Entry::new());
//!
//! let report = gate(vec![sheet], ValidationPolicy::SkipInvalid).unwrap();
//! let output = GraphBuilder::new("urn:lkt:run/").build(&report.sheets, "logbook.ods");
//! assert_eq!(output.summary.subjects, 1);
//! ```

pub mod builder;
pub mod convert;
pub mod error;
pub mod graph;
pub mod load;
pub mod record;
pub mod registry;
pub mod serialize;
pub mod validate;

pub use builder::{BuildOutput, BuildSummary, GraphBuilder};
pub use convert::{convert, ConversionReport, ConvertConfig};
pub use error::{ConvertError, ConvertResult};
pub use graph::{Graph, Iri, Literal, Resource, Statement, StatementSink, Term};
pub use load::{load_sheets, LoadError};
pub use record::{DateField, Entry, Flag, Sheet};
pub use registry::{EntityId, IdMinter, IdentityRegistry, Namespace, RandomMinter, Resolution, SequentialMinter};
pub use serialize::{check_iri, serialize, write_graph, RdfFormat, SerializeError, SUPPORTED_FORMATS};
pub use validate::{gate, validate_entry, validate_sheet, Diagnostic, Field, GateReport, Rejected, ValidationPolicy, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
