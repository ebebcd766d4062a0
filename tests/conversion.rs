//! End-to-end conversion runs over records files

mod common;

use common::RECORDS_YAML;
use lktlog::graph::vocab;
use lktlog::{convert, ConvertConfig, ConvertError, RdfFormat, ValidationPolicy};
use oxigraph::io::{RdfFormat as OxFormat, RdfParser};
use oxigraph::model::{Quad, Term as OxTerm};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn records_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("logbook.yaml");
    fs::write(&path, RECORDS_YAML).unwrap();
    path
}

fn read_back(path: &Path, format: RdfFormat) -> Vec<Quad> {
    let oxformat = match format {
        RdfFormat::Turtle => OxFormat::Turtle,
        RdfFormat::RdfXml => OxFormat::RdfXml,
        RdfFormat::NTriples => OxFormat::NTriples,
        RdfFormat::JsonLd => OxFormat::from_extension("jsonld").unwrap(),
    };
    let bytes = fs::read(path).unwrap();
    RdfParser::from_format(oxformat)
        .for_reader(bytes.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("{format} output does not parse: {e}"))
}

fn datatypes(quads: &[Quad]) -> BTreeSet<String> {
    quads
        .iter()
        .filter_map(|q| match &q.object {
            OxTerm::Literal(lit) => Some(lit.datatype().as_str().to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn every_format_reads_back_as_the_built_graph() {
    let dir = TempDir::new().unwrap();
    let input = records_file(&dir);
    let expected: BTreeSet<String> = [
        vocab::XSD_STRING,
        vocab::XSD_DATE,
        vocab::XSD_DATE_TIME,
        vocab::XSD_BOOLEAN,
        vocab::XSD_DECIMAL,
    ]
    .into_iter()
    .map(String::from)
    .collect();

    for format in [RdfFormat::Turtle, RdfFormat::RdfXml, RdfFormat::NTriples, RdfFormat::JsonLd] {
        let output = dir.path().join(format!("graph.{}", format.extension()));
        let config = ConvertConfig::new(&input).with_output(&output).with_format(format);

        let report = convert(&config).unwrap();

        assert_eq!(report.output, output);
        assert_eq!(report.summary.subjects, 1, "{}", format);
        assert_eq!(report.summary.experiments, 2, "{}", format);
        let quads = read_back(&output, format);
        assert_eq!(quads.len(), report.summary.statements, "{}", format);
        assert_eq!(datatypes(&quads), expected, "{}", format);
    }
}

#[test]
fn output_path_with_iri_delimiters_still_reads_back() {
    let dir = TempDir::new().unwrap();
    let input = records_file(&dir);
    let run_dir = dir.path().join("run {1}");
    fs::create_dir(&run_dir).unwrap();

    for format in [RdfFormat::Turtle, RdfFormat::NTriples] {
        let output = run_dir.join(format!("out\"x\".{}", format.extension()));
        let report = convert(&ConvertConfig::new(&input).with_output(&output).with_format(format)).unwrap();

        let quads = read_back(&output, format);
        assert_eq!(quads.len(), report.summary.statements, "{}", format);
        let subject = quads[0].subject.to_string();
        assert!(subject.contains("run%20%7B1%7D/out%22x%22."), "{}", subject);
    }
}

#[test]
fn invalid_records_are_reported_not_written() {
    let dir = TempDir::new().unwrap();
    let input = records_file(&dir);
    let output = dir.path().join("graph.nt");

    let report = convert(
        &ConvertConfig::new(&input)
            .with_output(&output)
            .with_format(RdfFormat::NTriples),
    )
    .unwrap();

    assert_eq!(report.empty_lines, 1);
    assert_eq!(report.rejected.len(), 2);
    let entry = report.rejected.iter().find(|r| r.row.is_some()).unwrap();
    assert_eq!(entry.subject_id, "A1");
    assert_eq!(entry.row, Some(4));
    let sheet = report.rejected.iter().find(|r| r.row.is_none()).unwrap();
    assert_eq!(sheet.subject_id, "B2");

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("Orphan"));
    assert!(!text.contains("\"B2\""));
    assert_eq!(text.lines().count(), report.summary.statements);
}

#[test]
fn instance_iris_derive_from_output_path() {
    let dir = TempDir::new().unwrap();
    let input = records_file(&dir);
    let output = dir.path().join("graph.nt");

    convert(
        &ConvertConfig::new(&input)
            .with_output(&output)
            .with_format(RdfFormat::NTriples),
    )
    .unwrap();

    let local_ns = vocab::local_namespace(&output);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.lines().all(|line| line.starts_with(&format!("<{}", local_ns)) || line.starts_with("_:")));
}

#[test]
fn unknown_diet_value_is_written_as_false() {
    let dir = TempDir::new().unwrap();
    let input = records_file(&dir);
    let output = dir.path().join("graph.nt");

    convert(
        &ConvertConfig::new(&input)
            .with_output(&output)
            .with_format(RdfFormat::NTriples),
    )
    .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let diet: Vec<&str> = text.lines().filter(|l| l.contains(vocab::HAS_DIET)).collect();
    assert_eq!(diet.len(), 2);
    assert!(diet.iter().all(|l| l.contains("\"false\"^^")));
}

#[test]
fn abort_policy_stops_at_first_invalid_record() {
    let dir = TempDir::new().unwrap();
    let input = records_file(&dir);
    let output = dir.path().join("graph.ttl");

    let err = convert(
        &ConvertConfig::new(&input)
            .with_output(&output)
            .with_policy(ValidationPolicy::Abort),
    )
    .unwrap_err();

    match err {
        ConvertError::Invalid(rejected) => {
            assert_eq!(rejected.subject_id, "A1");
            assert_eq!(rejected.row, Some(4));
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn json_records_load_like_yaml() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("logbook.json");
    fs::write(
        &input,
        r#"{"sheets": [{
            "subject_id": "C3", "sex": "m",
            "date_of_birth": "01.02.2019", "date_of_withdrawal": "01.02.2021",
            "permit_number": 42, "species": "rat",
            "entries": [{"project": "ProjJ", "experiment": "Run",
                         "experiment_date": "05.02.2020 10:30",
                         "last_name": "Jones", "is_on_diet": true, "weight": 301.5}]
        }]}"#,
    )
    .unwrap();
    let output = dir.path().join("graph.nt");

    let report = convert(
        &ConvertConfig::new(&input)
            .with_output(&output)
            .with_format(RdfFormat::NTriples),
    )
    .unwrap();

    assert!(report.rejected.is_empty());
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("\"42\" ."));
    assert!(text.contains("\"301.5\"^^"));
    let diet = text.lines().find(|l| l.contains(vocab::HAS_DIET)).unwrap();
    assert!(diet.contains("\"true\"^^"));
}

#[test]
fn missing_input_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = convert(&ConvertConfig::new(dir.path().join("absent.yaml")).with_output(dir.path().join("o.ttl")))
        .unwrap_err();

    assert!(matches!(err, ConvertError::Load { .. }));
}

#[test]
fn unknown_input_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("logbook.ods");
    fs::write(&input, "binary").unwrap();

    let err = convert(&ConvertConfig::new(&input).with_output(dir.path().join("o.ttl"))).unwrap_err();
    assert!(matches!(err, ConvertError::Load { .. }));
    assert!(err.to_string().contains("logbook.ods"));
}
