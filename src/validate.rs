//! Record validation and the gate that decides what reaches the builder
//!
//! `validate_sheet` and `validate_entry` are pure and total: every rule is
//! checked, each violation yields its own [`Diagnostic`], and an empty list
//! means the record is well formed.

use crate::error::{ConvertError, ConvertResult};
use crate::record::{DateField, Entry, Sheet, SHEET_DATE_PATTERN, SUBJECT_SEXES};
use tracing::{debug, warn};

/// The field a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SubjectId,
    PermitNumber,
    Species,
    Sex,
    DateOfBirth,
    DateOfWithdrawal,
    Project,
    Experiment,
    ExperimentDate,
    ExperimenterSurname,
}

impl Field {
    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::SubjectId => "animal ID",
            Self::PermitNumber => "permit number",
            Self::Species => "species entry",
            Self::Sex => "animal sex entry",
            Self::DateOfBirth => "Date of birth",
            Self::DateOfWithdrawal => "Date of withdrawal",
            Self::Project => "project",
            Self::Experiment => "experiment",
            Self::ExperimentDate => "experiment date",
            Self::ExperimenterSurname => "name of experimenter",
        }
    }
}

/// What is wrong with a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Required value is absent or blank
    Missing,
    /// Value is present but not acceptable; carries the offending text
    Invalid(String),
}

/// One violated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub field: Field,
    pub violation: Violation,
}

impl Diagnostic {
    pub fn missing(field: Field) -> Self {
        Self {
            field,
            violation: Violation::Missing,
        }
    }

    pub fn invalid(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            violation: Violation::Invalid(value.into()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.field, &self.violation) {
            (Field::DateOfBirth | Field::DateOfWithdrawal, Violation::Missing) => {
                write!(f, "{} is missing", self.field.label())
            }
            (Field::DateOfBirth | Field::DateOfWithdrawal, Violation::Invalid(value)) => write!(
                f,
                "Invalid {} format ({}). Please check the date and use format '{}'",
                self.field.label(),
                value,
                SHEET_DATE_PATTERN
            ),
            (Field::Sex, Violation::Invalid(value)) => write!(f, "Invalid animal sex ({})", value),
            (field, Violation::Invalid(value)) => write!(f, "Invalid {} ({})", field.label(), value),
            (field, Violation::Missing) => write!(f, "Missing {}", field.label()),
        }
    }
}

/// Check the sheet-level fields. Entries are validated separately.
pub fn validate_sheet(sheet: &Sheet) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    require(&mut diagnostics, Field::SubjectId, Some(sheet.subject_id()));
    require(&mut diagnostics, Field::PermitNumber, Some(sheet.permit_number()));
    require(&mut diagnostics, Field::Species, sheet.species());

    let sex = sheet.sex();
    if sex.is_empty() {
        diagnostics.push(Diagnostic::missing(Field::Sex));
    } else if !SUBJECT_SEXES.contains(&sex) {
        diagnostics.push(Diagnostic::invalid(Field::Sex, sex));
    }

    check_date(&mut diagnostics, Field::DateOfBirth, &sheet.date_of_birth);
    check_date(&mut diagnostics, Field::DateOfWithdrawal, &sheet.date_of_withdrawal);

    diagnostics
}

/// Check that all required entry fields are present.
pub fn validate_entry(entry: &Entry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    require(&mut diagnostics, Field::Project, entry.project());
    require(&mut diagnostics, Field::Experiment, entry.experiment());
    if entry.experiment_date.is_none() {
        diagnostics.push(Diagnostic::missing(Field::ExperimentDate));
    }
    require(&mut diagnostics, Field::ExperimenterSurname, entry.last_name());

    diagnostics
}

fn require(diagnostics: &mut Vec<Diagnostic>, field: Field, value: Option<&str>) {
    if value.map_or(true, str::is_empty) {
        diagnostics.push(Diagnostic::missing(field));
    }
}

fn check_date(diagnostics: &mut Vec<Diagnostic>, field: Field, value: &DateField) {
    match value {
        DateField::Valid(_) => {}
        DateField::Missing => diagnostics.push(Diagnostic::missing(field)),
        DateField::Invalid(raw) => diagnostics.push(Diagnostic::invalid(field, raw.as_str())),
    }
}

/// What to do with records that fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Drop the offending sheet or entry and carry on
    #[default]
    SkipInvalid,
    /// Stop the run at the first invalid record
    Abort,
}

/// A sheet or entry the gate refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Position of the sheet in the input (0-based)
    pub sheet_index: usize,
    pub subject_id: String,
    /// Entry row within the sheet (1-based); `None` when the sheet itself was rejected
    pub row: Option<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl std::fmt::Display for Rejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "sheet {} ('{}'), entry {}: ", self.sheet_index + 1, self.subject_id, row)?,
            None => write!(f, "sheet {} ('{}'): ", self.sheet_index + 1, self.subject_id)?,
        }
        let messages: Vec<String> = self.diagnostics.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Outcome of running sheets through the gate
#[derive(Debug, Clone, Default)]
pub struct GateReport {
    /// Sheets to hand to the builder, with empty and invalid entries removed
    pub sheets: Vec<Sheet>,
    pub rejected: Vec<Rejected>,
    /// Number of blank rows dropped
    pub empty_lines: usize,
}

impl GateReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Filter sheets down to what the builder should see.
///
/// Empty lines are always dropped. Invalid sheets and entries are dropped
/// under [`ValidationPolicy::SkipInvalid`], or end the run with
/// [`ConvertError::Invalid`] under [`ValidationPolicy::Abort`].
pub fn gate(sheets: Vec<Sheet>, policy: ValidationPolicy) -> ConvertResult<GateReport> {
    let mut report = GateReport::default();

    for (sheet_index, mut sheet) in sheets.into_iter().enumerate() {
        let diagnostics = validate_sheet(&sheet);
        if !diagnostics.is_empty() {
            reject(
                &mut report,
                policy,
                Rejected {
                    sheet_index,
                    subject_id: sheet.subject_id().to_string(),
                    row: None,
                    diagnostics,
                },
            )?;
            continue;
        }

        let entries = std::mem::take(&mut sheet.entries);
        for (i, entry) in entries.into_iter().enumerate() {
            if entry.is_empty_line() {
                debug!(sheet = sheet_index + 1, row = i + 1, "skipping empty line");
                report.empty_lines += 1;
                continue;
            }
            let diagnostics = validate_entry(&entry);
            if diagnostics.is_empty() {
                sheet.entries.push(entry);
            } else {
                reject(
                    &mut report,
                    policy,
                    Rejected {
                        sheet_index,
                        subject_id: sheet.subject_id().to_string(),
                        row: Some(i + 1),
                        diagnostics,
                    },
                )?;
            }
        }
        report.sheets.push(sheet);
    }

    Ok(report)
}

fn reject(report: &mut GateReport, policy: ValidationPolicy, rejected: Rejected) -> ConvertResult<()> {
    match policy {
        ValidationPolicy::Abort => Err(ConvertError::Invalid(Box::new(rejected))),
        ValidationPolicy::SkipInvalid => {
            warn!("skipping invalid record: {}", rejected);
            report.rejected.push(rejected);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_sheet() -> Sheet {
        Sheet::new("A1")
            .with_sex("f")
            .with_dates("01.01.2019", "01.01.2021")
            .with_permit("P-100")
            .with_species("mouse")
    }

    fn valid_entry() -> Entry {
        Entry::new()
            .with_project("ProjX")
            .with_experiment("E1")
            .with_experiment_date(
                NaiveDate::from_ymd_opt(2020, 1, 2)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            )
            .with_experimenter(Some("Jane"), "Smith")
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
        diagnostics.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn valid_sheet_has_no_diagnostics() {
        assert!(validate_sheet(&valid_sheet()).is_empty());
    }

    #[test]
    fn every_missing_sheet_field_reported_separately() {
        let sheet = Sheet::default();
        assert_eq!(
            messages(&validate_sheet(&sheet)),
            vec![
                "Missing animal ID",
                "Missing permit number",
                "Missing species entry",
                "Missing animal sex entry",
                "Date of birth is missing",
                "Date of withdrawal is missing",
            ]
        );
    }

    #[test]
    fn invalid_sex_is_echoed() {
        let diagnostics = validate_sheet(&valid_sheet().with_sex("male"));
        assert_eq!(diagnostics, vec![Diagnostic::invalid(Field::Sex, "male")]);
        assert_eq!(diagnostics[0].to_string(), "Invalid animal sex (male)");
    }

    #[test]
    fn malformed_dates_report_expected_pattern() {
        let sheet = valid_sheet().with_dates("2019-01-01", "");
        assert_eq!(
            messages(&validate_sheet(&sheet)),
            vec![
                "Invalid Date of birth format (2019-01-01). Please check the date and use format 'dd.MM.yyyy'",
                "Date of withdrawal is missing",
            ]
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let sheet = Sheet::new("").with_sex("x");
        assert_eq!(validate_sheet(&sheet), validate_sheet(&sheet));
    }

    #[test]
    fn valid_entry_has_no_diagnostics() {
        assert!(validate_entry(&valid_entry()).is_empty());
    }

    #[test]
    fn entry_flags_exactly_the_missing_fields() {
        let mut entry = valid_entry();
        entry.experiment = None;
        entry.last_name = Some(String::new());

        let fields: Vec<Field> = validate_entry(&entry).iter().map(|d| d.field).collect();
        assert_eq!(fields, vec![Field::Experiment, Field::ExperimenterSurname]);
    }

    #[test]
    fn empty_entry_flags_all_required_fields() {
        assert_eq!(
            messages(&validate_entry(&Entry::new())),
            vec![
                "Missing project",
                "Missing experiment",
                "Missing experiment date",
                "Missing name of experimenter",
            ]
        );
    }

    #[test]
    fn gate_drops_empty_lines_and_invalid_entries() {
        let sheet = valid_sheet()
            .with_entry(valid_entry())
            .with_entry(Entry::new())
            .with_entry(Entry::new().with_project("ProjY"));

        let report = gate(vec![sheet], ValidationPolicy::SkipInvalid).unwrap();

        assert_eq!(report.sheets.len(), 1);
        assert_eq!(report.sheets[0].entries.len(), 1);
        assert_eq!(report.empty_lines, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].row, Some(3));
        assert_eq!(report.rejected[0].diagnostics.len(), 3);
    }

    #[test]
    fn gate_drops_invalid_sheet_with_its_entries() {
        let bad = Sheet::new("B2").with_entry(valid_entry());
        let report = gate(vec![bad, valid_sheet()], ValidationPolicy::SkipInvalid).unwrap();

        assert_eq!(report.sheets.len(), 1);
        assert_eq!(report.sheets[0].subject_id(), "A1");
        assert_eq!(report.rejected[0].sheet_index, 0);
        assert_eq!(report.rejected[0].row, None);
        assert!(!report.is_clean());
    }

    #[test]
    fn gate_aborts_on_first_invalid_record() {
        let sheet = valid_sheet().with_entry(Entry::new().with_experiment("E9"));
        let err = gate(vec![sheet], ValidationPolicy::Abort).unwrap_err();

        match err {
            ConvertError::Invalid(rejected) => {
                assert_eq!(rejected.row, Some(1));
                assert!(rejected.to_string().starts_with("sheet 1 ('A1'), entry 1: Missing project"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
