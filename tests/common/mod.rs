//! Common test utilities for lktlog integration tests

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::{entry, sheet, timestamp, two_session_logbook, RECORDS_YAML};

use lktlog::graph::vocab;
use lktlog::Graph;

/// Number of distinct entities per class, in a fixed class order
pub fn entity_counts(graph: &Graph) -> Vec<(&'static str, usize)> {
    [
        ("Provenance", vocab::PROVENANCE),
        ("Subject", vocab::SUBJECT),
        ("Permit", vocab::PERMIT),
        ("Project", vocab::PROJECT),
        ("Experimenter", vocab::EXPERIMENTER),
        ("Experiment", vocab::EXPERIMENT),
        ("SubjectLogEntry", vocab::SUBJECT_LOG_ENTRY),
    ]
    .into_iter()
    .map(|(name, class)| (name, graph.instances_of(class).len()))
    .collect()
}
