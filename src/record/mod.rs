//! Record model: sheets and their experiment entries
//!
//! Plain value objects. Validity and emptiness are derived on read; nothing
//! is recomputed as a side effect of setting a field.

mod entry;
mod fields;
mod sheet;

pub use entry::Entry;
pub use fields::{DateField, Flag, SHEET_DATE_PATTERN};
pub use sheet::{Sheet, SUBJECT_SEXES};
