//! Entry: one experiment-session row of a logbook sheet

use super::fields::{non_blank, Flag};
use crate::validate::validate_entry;
use chrono::NaiveDateTime;

/// One experiment session recorded for a subject.
///
/// Blank text fields count as unset everywhere: in validation, in the
/// empty-line check and when the builder decides which literals to emit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub project: Option<String>,
    pub experiment: Option<String>,
    pub paradigm: Option<String>,
    pub paradigm_specifics: Option<String>,
    /// When the session took place
    pub experiment_date: Option<NaiveDateTime>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    /// Surname of the experimenter; experimenters are identified by it
    pub last_name: Option<String>,
    pub comment_experiment: Option<String>,
    pub comment_subject: Option<String>,
    pub feed: Option<String>,
    pub is_on_diet: Flag,
    pub is_initial_weight: Flag,
    /// Weight in grams
    pub weight: Option<f64>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self) -> Option<&str> {
        non_blank(&self.project)
    }

    pub fn experiment(&self) -> Option<&str> {
        non_blank(&self.experiment)
    }

    pub fn paradigm(&self) -> Option<&str> {
        non_blank(&self.paradigm)
    }

    pub fn paradigm_specifics(&self) -> Option<&str> {
        non_blank(&self.paradigm_specifics)
    }

    pub fn last_name(&self) -> Option<&str> {
        non_blank(&self.last_name)
    }

    pub fn comment_experiment(&self) -> Option<&str> {
        non_blank(&self.comment_experiment)
    }

    pub fn comment_subject(&self) -> Option<&str> {
        non_blank(&self.comment_subject)
    }

    pub fn feed(&self) -> Option<&str> {
        non_blank(&self.feed)
    }

    /// Full name of the experimenter: first, middle and last name joined by
    /// single spaces, skipping unset parts.
    pub fn experimenter_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True while none of project, experiment, experiment date and
    /// experimenter surname is set.
    ///
    /// Spreadsheet readers pick up formatted but otherwise blank rows; this
    /// is how they are told apart from rows that are merely incomplete.
    pub fn is_empty_line(&self) -> bool {
        self.project().is_none()
            && self.experiment().is_none()
            && self.experiment_date.is_none()
            && self.last_name().is_none()
    }

    /// True if all required fields are present. Independent of
    /// [`Entry::is_empty_line`].
    pub fn is_valid(&self) -> bool {
        validate_entry(self).is_empty()
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = Some(experiment.into());
        self
    }

    pub fn with_experiment_date(mut self, date: NaiveDateTime) -> Self {
        self.experiment_date = Some(date);
        self
    }

    pub fn with_experimenter(
        mut self,
        first_name: Option<&str>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = first_name.map(str::to_string);
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_paradigm(mut self, paradigm: impl Into<String>) -> Self {
        self.paradigm = Some(paradigm.into());
        self
    }

    pub fn with_weight(mut self, grams: f64) -> Self {
        self.weight = Some(grams);
        self
    }

    pub fn with_diet(mut self, on_diet: Flag) -> Self {
        self.is_on_diet = on_diet;
        self
    }

    pub fn with_feed(mut self, feed: impl Into<String>) -> Self {
        self.feed = Some(feed.into());
        self
    }
}
