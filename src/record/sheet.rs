//! Sheet: the logbook of one subject animal

use super::entry::Entry;
use super::fields::{non_blank, DateField};
use crate::validate::validate_sheet;

/// Sex values a sheet may carry
pub const SUBJECT_SEXES: [&str; 2] = ["m", "f"];

/// All information parsed from one logbook sheet.
///
/// Required cells are kept as raw text (possibly empty) so validation can
/// report exactly what was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Animal ID. Required.
    pub subject_id: String,
    /// `m` or `f`. Required.
    pub sex: String,
    pub date_of_birth: DateField,
    pub date_of_withdrawal: DateField,
    /// Permit the animal is kept under. Required.
    pub permit_number: String,
    /// Common species name
    pub species: Option<String>,
    pub scientific_name: Option<String>,
    /// Experiment entries in row order
    pub entries: Vec<Entry>,
}

impl Sheet {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ..Default::default()
        }
    }

    pub fn subject_id(&self) -> &str {
        self.subject_id.trim()
    }

    pub fn sex(&self) -> &str {
        self.sex.trim()
    }

    pub fn permit_number(&self) -> &str {
        self.permit_number.trim()
    }

    pub fn species(&self) -> Option<&str> {
        non_blank(&self.species)
    }

    pub fn scientific_name(&self) -> Option<&str> {
        non_blank(&self.scientific_name)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// True if all required sheet-level fields are present and well formed.
    /// Entries are not considered.
    pub fn is_valid(&self) -> bool {
        validate_sheet(self).is_empty()
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = sex.into();
        self
    }

    /// Set both dates from `dd.MM.yyyy` cells
    pub fn with_dates(mut self, birth: &str, withdrawal: &str) -> Self {
        self.date_of_birth = DateField::parse(birth);
        self.date_of_withdrawal = DateField::parse(withdrawal);
        self
    }

    pub fn with_permit(mut self, permit_number: impl Into<String>) -> Self {
        self.permit_number = permit_number.into();
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_scientific_name(mut self, name: impl Into<String>) -> Self {
        self.scientific_name = Some(name.into());
        self
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complete() -> Sheet {
        Sheet::new("A1")
            .with_sex("f")
            .with_dates("01.01.2019", "01.01.2021")
            .with_permit("P-100")
            .with_species("mouse")
    }

    #[test]
    fn complete_sheet_is_valid() {
        let sheet = complete();
        assert!(sheet.is_valid());
        assert_eq!(
            sheet.date_of_birth.date(),
            NaiveDate::from_ymd_opt(2019, 1, 1)
        );
    }

    #[test]
    fn scientific_name_is_optional() {
        let sheet = complete();
        assert!(sheet.scientific_name().is_none());
        assert!(sheet.is_valid());
    }

    #[test]
    fn unknown_sex_invalidates_sheet() {
        assert!(!complete().with_sex("x").is_valid());
        assert!(!complete().with_sex("").is_valid());
    }

    #[test]
    fn accessors_trim_cells() {
        let sheet = Sheet::new("  A1 ").with_sex(" m").with_species(" ");
        assert_eq!(sheet.subject_id(), "A1");
        assert_eq!(sheet.sex(), "m");
        assert!(sheet.species().is_none());
    }
}
