//! Logbook fixtures shared by the integration tests

use chrono::{NaiveDate, NaiveDateTime};
use lktlog::{Entry, Flag, Sheet};

pub fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture timestamp")
}

/// A complete sheet without entries
pub fn sheet(subject: &str) -> Sheet {
    Sheet::new(subject)
        .with_sex("f")
        .with_dates("01.01.2019", "01.01.2021")
        .with_permit("P-100")
        .with_species("mouse")
}

/// A complete entry
pub fn entry(project: &str, experiment: &str, surname: &str) -> Entry {
    Entry::new()
        .with_project(project)
        .with_experiment(experiment)
        .with_experiment_date(timestamp(2, 9))
        .with_experimenter(Some("Jane"), surname)
        .with_diet(Flag::No)
}

/// The two-entry logbook used across scenarios: one subject, one project,
/// one experimenter
pub fn two_session_logbook() -> Vec<Sheet> {
    vec![sheet("A1")
        .with_entry(entry("ProjX", "Maze run", "Smith").with_weight(21.5))
        .with_entry(entry("ProjX", "Open field", "Smith").with_feed("standard chow"))]
}

pub const RECORDS_YAML: &str = r#"
sheets:
  - subject_id: A1
    sex: f
    date_of_birth: 01.01.2019
    date_of_withdrawal: 01.01.2021
    permit_number: P-100
    species: mouse
    scientific_name: Mus musculus
    entries:
      - project: ProjX
        experiment: Maze run
        experiment_date: 02.01.2020 09:00
        first_name: Jane
        last_name: Smith
        is_on_diet: n
        weight: "21,5"
      - project: ProjX
        experiment: Open field
        experiment_date: 03.01.2020 09:00
        last_name: Smith
        is_on_diet: "?"
      - {}
      - experiment: Orphan
  - subject_id: B2
    sex: x
    permit_number: P-200
    species: rat
"#;
