//! Conversion pipeline: load → validate → build → write
//!
//! One call to [`convert`] is one conversion run with its own identity
//! registry and provenance record.

use crate::builder::{BuildSummary, GraphBuilder};
use crate::error::ConvertResult;
use crate::graph::vocab;
use crate::load::load_sheets;
use crate::serialize::{check_iri, write_graph, RdfFormat};
use crate::validate::{gate, Rejected, ValidationPolicy};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Records document to read
    pub input: PathBuf,
    /// Output file; defaults to `yyyyMMddHHmm_out.<ext>` in the working directory
    pub output: Option<PathBuf>,
    pub format: RdfFormat,
    pub policy: ValidationPolicy,
}

impl ConvertConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            format: RdfFormat::default(),
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse and set the format by name. Fails before any input is touched.
    pub fn with_format_name(self, name: &str) -> ConvertResult<Self> {
        let format = name.parse()?;
        Ok(self.with_format(format))
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Output path, falling back to a timestamped default name
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}_out.{}",
                Local::now().format("%Y%m%d%H%M"),
                self.format.extension()
            ))
        })
    }
}

/// What a finished run did
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub summary: BuildSummary,
    /// Records the gate dropped
    pub rejected: Vec<Rejected>,
    pub empty_lines: usize,
}

/// Run a full conversion as described by `config`
pub fn convert(config: &ConvertConfig) -> ConvertResult<ConversionReport> {
    let output = config.output_path();
    info!(input = %config.input.display(), output = %output.display(), format = %config.format, "starting conversion");

    let local_ns = vocab::local_namespace(&output);
    check_iri(&local_ns)?;

    let sheets = load_sheets(&config.input)?;
    let report = gate(sheets, config.policy)?;

    let built = GraphBuilder::new(local_ns.as_str()).build(&report.sheets, &source_name(&config.input));

    write_graph(&output, &built.graph, config.format, Some(&local_ns))?;
    info!(
        statements = built.summary.statements,
        rejected = report.rejected.len(),
        "conversion finished"
    );

    Ok(ConversionReport {
        output,
        summary: built.summary,
        rejected: report.rejected,
        empty_lines: report.empty_lines,
    })
}

fn source_name(input: &Path) -> String {
    input.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn default_output_name_follows_format() {
        let config = ConvertConfig::new("logbook.yaml").with_format(RdfFormat::JsonLd);
        let name = config.output_path().to_string_lossy().into_owned();

        assert!(name.ends_with("_out.jsonld"));
        assert_eq!(name.len(), "yyyyMMddHHmm_out.jsonld".len());
    }

    #[test]
    fn explicit_output_wins() {
        let config = ConvertConfig::new("in.yaml").with_output("graph.nt");
        assert_eq!(config.output_path(), PathBuf::from("graph.nt"));
    }

    #[test]
    fn unsupported_format_fails_before_reading_input() {
        let err = ConvertConfig::new("does-not-exist.yaml")
            .with_format_name("N3")
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
    }
}
