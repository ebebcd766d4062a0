//! Loader for sheets that were already read from the logbook spreadsheet
//!
//! Accepts a YAML or JSON document of the form
//!
//! ```yaml
//! sheets:
//!   - subject_id: A1
//!     sex: f
//!     date_of_birth: 01.01.2019
//!     date_of_withdrawal: 01.01.2021
//!     permit_number: P-100
//!     species: mouse
//!     entries:
//!       - project: ProjX
//!         experiment: E1
//!         experiment_date: 02.01.2020 09:00
//!         last_name: Smith
//!         is_on_diet: y
//!         weight: "23,5"
//! ```
//!
//! Cells are taken as text the way a spreadsheet reader returns them; numbers
//! and booleans are accepted and converted.

use crate::error::{ConvertError, ConvertResult};
use crate::record::{DateField, Entry, Flag, Sheet};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Timestamp layouts accepted for `experiment_date`, tried in order
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Errors that can occur while reading a records document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown file extension '{0}', expected yaml, yml or json")]
    UnknownExtension(String),
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    sheets: Vec<RawSheet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSheet {
    #[serde(deserialize_with = "cell")]
    subject_id: Option<String>,
    #[serde(deserialize_with = "cell")]
    sex: Option<String>,
    #[serde(deserialize_with = "cell")]
    date_of_birth: Option<String>,
    #[serde(deserialize_with = "cell")]
    date_of_withdrawal: Option<String>,
    #[serde(deserialize_with = "cell")]
    permit_number: Option<String>,
    #[serde(deserialize_with = "cell")]
    species: Option<String>,
    #[serde(deserialize_with = "cell")]
    scientific_name: Option<String>,
    entries: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    #[serde(deserialize_with = "cell")]
    project: Option<String>,
    #[serde(deserialize_with = "cell")]
    experiment: Option<String>,
    #[serde(deserialize_with = "cell")]
    paradigm: Option<String>,
    #[serde(deserialize_with = "cell")]
    paradigm_specifics: Option<String>,
    #[serde(deserialize_with = "cell")]
    experiment_date: Option<String>,
    #[serde(deserialize_with = "cell")]
    first_name: Option<String>,
    #[serde(deserialize_with = "cell")]
    middle_name: Option<String>,
    #[serde(deserialize_with = "cell")]
    last_name: Option<String>,
    #[serde(deserialize_with = "cell")]
    comment_experiment: Option<String>,
    #[serde(deserialize_with = "cell")]
    comment_subject: Option<String>,
    #[serde(deserialize_with = "cell")]
    feed: Option<String>,
    #[serde(deserialize_with = "cell")]
    is_on_diet: Option<String>,
    #[serde(deserialize_with = "cell")]
    is_initial_weight: Option<String>,
    #[serde(deserialize_with = "cell")]
    weight: Option<String>,
}

/// Read any scalar cell as text
fn cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Bool(b)) => Some(if b { "y" } else { "n" }.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Load sheets from a `.yaml`, `.yml` or `.json` file
pub fn load_sheets(path: &Path) -> ConvertResult<Vec<Sheet>> {
    let wrap = |source: LoadError| ConvertError::Load {
        path: path.to_path_buf(),
        source,
    };
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let text = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    let sheets = match ext.as_str() {
        "yaml" | "yml" => from_yaml_str(&text),
        "json" => from_json_str(&text),
        _ => Err(LoadError::UnknownExtension(ext)),
    }
    .map_err(wrap)?;

    info!(path = %path.display(), sheets = sheets.len(), "loaded logbook sheets");
    Ok(sheets)
}

pub fn from_yaml_str(text: &str) -> Result<Vec<Sheet>, LoadError> {
    let doc: RawDocument = serde_yaml::from_str(text)?;
    Ok(doc.sheets.into_iter().map(into_sheet).collect())
}

pub fn from_json_str(text: &str) -> Result<Vec<Sheet>, LoadError> {
    let doc: RawDocument = serde_json::from_str(text)?;
    Ok(doc.sheets.into_iter().map(into_sheet).collect())
}

fn into_sheet(raw: RawSheet) -> Sheet {
    Sheet {
        subject_id: raw.subject_id.unwrap_or_default(),
        sex: raw.sex.unwrap_or_default(),
        date_of_birth: DateField::parse(raw.date_of_birth.as_deref().unwrap_or_default()),
        date_of_withdrawal: DateField::parse(raw.date_of_withdrawal.as_deref().unwrap_or_default()),
        permit_number: raw.permit_number.unwrap_or_default(),
        species: raw.species,
        scientific_name: raw.scientific_name,
        entries: raw.entries.into_iter().map(into_entry).collect(),
    }
}

fn into_entry(raw: RawEntry) -> Entry {
    Entry {
        experiment_date: raw.experiment_date.as_deref().and_then(parse_timestamp),
        is_on_diet: raw.is_on_diet.as_deref().map(Flag::from_cell).unwrap_or_default(),
        is_initial_weight: raw
            .is_initial_weight
            .as_deref()
            .map(Flag::from_cell)
            .unwrap_or_default(),
        weight: raw.weight.as_deref().and_then(parse_weight),
        project: raw.project,
        experiment: raw.experiment,
        paradigm: raw.paradigm,
        paradigm_specifics: raw.paradigm_specifics,
        first_name: raw.first_name,
        middle_name: raw.middle_name,
        last_name: raw.last_name,
        comment_experiment: raw.comment_experiment,
        comment_subject: raw.comment_subject,
        feed: raw.feed,
    }
}

/// Parse an experiment timestamp; blank cells are unset without a warning
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok());
    if parsed.is_none() {
        warn!(value = raw, "unparsable experiment date, left unset");
    }
    parsed
}

/// Parse a weight in grams; `,` is accepted as decimal separator
pub fn parse_weight(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(grams) if grams.is_finite() => Some(grams),
        _ => {
            warn!(value = raw, "unparsable weight, left unset");
            None
        }
    }
}
