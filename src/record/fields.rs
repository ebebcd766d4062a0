//! Cell-level value types shared by sheets and entries

use chrono::NaiveDate;

/// Pattern every sheet date has to follow, as shown to users
pub const SHEET_DATE_PATTERN: &str = "dd.MM.yyyy";

/// chrono equivalent of [`SHEET_DATE_PATTERN`]
const SHEET_DATE_FORMAT: &str = "%d.%m.%Y";

/// A calendar date cell, parsed once when the record is built.
///
/// Keeps the raw text of unparsable cells so diagnostics can echo it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateField {
    #[default]
    Missing,
    Invalid(String),
    Valid(NaiveDate),
}

impl DateField {
    /// Parse a cell in `dd.MM.yyyy` format. Blank cells are `Missing`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Missing;
        }
        match NaiveDate::parse_from_str(raw, SHEET_DATE_FORMAT) {
            Ok(date) => Self::Valid(date),
            Err(_) => Self::Invalid(raw.to_string()),
        }
    }

    /// The parsed date, if the cell held a valid one
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            _ => None,
        }
    }
}

impl From<NaiveDate> for DateField {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

/// A yes/no cell that may also be left blank or hold something unexpected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    Yes,
    No,
    #[default]
    Unspecified,
}

impl Flag {
    /// `y` and `n` (any case, surrounding whitespace ignored) are recognized;
    /// every other value is `Unspecified`.
    pub fn from_cell(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "y" => Self::Yes,
            "n" => Self::No,
            _ => Self::Unspecified,
        }
    }

    /// Collapse to a boolean; `Unspecified` becomes `false`.
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Yes)
    }

    pub(crate) fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Treat blank text as unset
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
