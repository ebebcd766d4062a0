//! Graph builder: turns validated sheets into a provenance-annotated graph
//!
//! The logbook is organised around the animal while the graph is organised
//! around projects, so the builder walks sheets and entries in input order
//! and resolves recurring names through the [`IdentityRegistry`]:
//!
//! - subjects are deduplicated by subject ID across sheets
//! - projects by name, experimenters by surname
//! - permits, experiments and subject log entries are always fresh
//!
//! Every entity links to the single provenance record of the run.

use crate::graph::{vocab, BlankId, Graph, Iri, Literal, Resource, Statement, StatementSink, Term};
use crate::record::{Entry, Sheet};
use crate::registry::{EntityId, IdentityRegistry, Namespace};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

/// Entity counts of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub subjects: usize,
    pub permits: usize,
    pub projects: usize,
    pub experimenters: usize,
    pub experiments: usize,
    pub log_entries: usize,
    pub statements: usize,
}

/// Everything a build produces
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub graph: Graph,
    /// Identifier of the run's provenance record
    pub provenance: EntityId,
    pub summary: BuildSummary,
}

/// Builds the graph for one conversion run.
///
/// Consumed by `build`; a new run needs a new builder, which keeps
/// identifiers from leaking between runs.
#[derive(Debug)]
pub struct GraphBuilder {
    local_ns: String,
    registry: IdentityRegistry,
    created_at: Option<NaiveDateTime>,
}

impl GraphBuilder {
    /// Create a builder whose instance IRIs live under `local_namespace`
    pub fn new(local_namespace: impl Into<String>) -> Self {
        Self {
            local_ns: local_namespace.into(),
            registry: IdentityRegistry::new(),
            created_at: None,
        }
    }

    /// Use a specific registry (e.g. one with a deterministic minter)
    pub fn with_registry(mut self, registry: IdentityRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Fix the provenance creation time instead of reading the clock
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the complete statement set for `sheets`.
    ///
    /// The builder does not filter: empty or invalid entries that reach it are
    /// processed. Run sheets through [`crate::validate::gate`] first.
    pub fn build(self, sheets: &[Sheet], input_source: &str) -> BuildOutput {
        let mut graph = Graph::new();
        let (provenance, summary) = self.build_into(sheets, input_source, &mut graph);
        BuildOutput {
            graph,
            provenance,
            summary,
        }
    }

    /// Build into an arbitrary sink. Returns the provenance identifier.
    pub fn build_into<S: StatementSink + ?Sized>(
        self,
        sheets: &[Sheet],
        input_source: &str,
        sink: &mut S,
    ) -> (EntityId, BuildSummary) {
        let GraphBuilder {
            local_ns,
            mut registry,
            created_at,
        } = self;

        let provenance_id = registry.mint();
        let mut run = Run {
            sink,
            registry,
            provenance: Iri::new(format!("{}{}", local_ns, provenance_id)),
            local_ns,
            summary: BuildSummary::default(),
            next_blank: 0,
        };

        let created_at = created_at.unwrap_or_else(|| Local::now().naive_local());
        run.add_provenance(input_source, created_at);
        for sheet in sheets {
            run.add_sheet(sheet);
        }

        info!(
            subjects = run.summary.subjects,
            projects = run.summary.projects,
            experimenters = run.summary.experimenters,
            experiments = run.summary.experiments,
            statements = run.summary.statements,
            "graph built"
        );
        (provenance_id, run.summary)
    }
}

/// State of a single build
struct Run<'s, S: StatementSink + ?Sized> {
    sink: &'s mut S,
    registry: IdentityRegistry,
    local_ns: String,
    provenance: Iri,
    summary: BuildSummary,
    next_blank: usize,
}

impl<S: StatementSink + ?Sized> Run<'_, S> {
    fn emit(&mut self, subject: impl Into<Resource>, predicate: &str, object: impl Into<Term>) {
        self.sink.emit(Statement::new(subject, predicate, object));
        self.summary.statements += 1;
    }

    /// Emit a string literal only when the value is set
    fn emit_optional(&mut self, subject: &Iri, predicate: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.emit(subject.clone(), predicate, Literal::string(value));
        }
    }

    fn local(&self, id: EntityId) -> Iri {
        Iri::new(format!("{}{}", self.local_ns, id))
    }

    fn blank(&mut self) -> BlankId {
        let id = BlankId::new(format!("b{}", self.next_blank));
        self.next_blank += 1;
        id
    }

    /// Type and provenance link shared by every entity
    fn declare(&mut self, entity: &Iri, class: &str) {
        self.emit(entity.clone(), vocab::RDF_TYPE, Iri::from(class));
        self.emit(entity.clone(), vocab::HAS_PROVENANCE, self.provenance.clone());
    }

    fn add_provenance(&mut self, input_source: &str, created_at: NaiveDateTime) {
        let prov = self.provenance.clone();
        self.emit(prov.clone(), vocab::RDF_TYPE, Iri::from(vocab::PROVENANCE));
        self.emit(prov.clone(), vocab::DC_SOURCE, Literal::string(input_source));
        self.emit(prov.clone(), vocab::DC_CREATED, Literal::date_time(created_at));
        self.emit(prov, vocab::DC_SUBJECT, Literal::string(vocab::PROVENANCE_DESCRIPTION));
    }

    fn add_sheet(&mut self, sheet: &Sheet) {
        let resolution = self.registry.resolve(Namespace::Subject, sheet.subject_id());
        let subject = self.local(resolution.id());

        if resolution.is_new() {
            self.summary.subjects += 1;
            self.declare(&subject, vocab::SUBJECT);
            self.emit(subject.clone(), vocab::HAS_SUBJECT_ID, Literal::string(sheet.subject_id()));
            self.emit(subject.clone(), vocab::HAS_SEX, Literal::string(sheet.sex()));
            match sheet.date_of_birth.date() {
                Some(date) => self.emit(subject.clone(), vocab::HAS_BIRTH_DATE, Literal::date(date)),
                None => warn!(subject = sheet.subject_id(), "no valid date of birth, literal omitted"),
            }
            match sheet.date_of_withdrawal.date() {
                Some(date) => self.emit(subject.clone(), vocab::HAS_WITHDRAWAL_DATE, Literal::date(date)),
                None => warn!(subject = sheet.subject_id(), "no valid date of withdrawal, literal omitted"),
            }
            self.emit_optional(&subject, vocab::HAS_SPECIES_NAME, sheet.species());
            self.emit_optional(&subject, vocab::HAS_SCIENTIFIC_NAME, sheet.scientific_name());
        }

        let permit_id = self.registry.mint();
        let permit = self.local(permit_id);
        self.summary.permits += 1;
        self.declare(&permit, vocab::PERMIT);
        self.emit(permit.clone(), vocab::HAS_NUMBER, Literal::string(sheet.permit_number()));
        self.emit(subject.clone(), vocab::HAS_PERMIT, permit);

        for entry in sheet.entries() {
            self.add_entry(entry, &subject);
        }
    }

    fn add_entry(&mut self, entry: &Entry, subject: &Iri) {
        let project_name = entry.project().unwrap_or_default();
        let resolution = self.registry.resolve(Namespace::Project, project_name);
        let project = self.local(resolution.id());
        if resolution.is_new() {
            self.summary.projects += 1;
            self.declare(&project, vocab::PROJECT);
            self.emit(project.clone(), vocab::RDFS_LABEL, Literal::string(project_name));
        }

        let surname = entry.last_name().unwrap_or_default();
        let resolution = self.registry.resolve(Namespace::Experimenter, surname);
        let experimenter = self.local(resolution.id());
        if resolution.is_new() {
            self.summary.experimenters += 1;
            self.declare(&experimenter, vocab::EXPERIMENTER);
            self.emit(experimenter.clone(), vocab::FOAF_NAME, Literal::string(entry.experimenter_name()));
            self.emit(experimenter.clone(), vocab::RDFS_SUB_CLASS_OF, Iri::from(vocab::FOAF_PERSON));
        }

        let experiment = self.add_experiment(entry);
        self.emit(experiment.clone(), vocab::HAS_EXPERIMENTER, experimenter.clone());
        self.emit(experiment.clone(), vocab::HAS_SUBJECT, subject.clone());
        self.emit(project, vocab::HAS_EXPERIMENT, experiment);

        let log_entry = self.add_log_entry(entry);
        self.emit(log_entry.clone(), vocab::HAS_EXPERIMENTER, experimenter);
        self.emit(subject.clone(), vocab::HAS_SUBJECT_LOG_ENTRY, log_entry);
    }

    fn add_experiment(&mut self, entry: &Entry) -> Iri {
        let id = self.registry.mint();
        let experiment = self.local(id);
        self.summary.experiments += 1;

        self.declare(&experiment, vocab::EXPERIMENT);
        self.emit_started_at(&experiment, entry);
        self.emit(
            experiment.clone(),
            vocab::RDFS_LABEL,
            Literal::string(entry.experiment().unwrap_or_default()),
        );
        self.emit_optional(&experiment, vocab::HAS_PARADIGM, entry.paradigm());
        self.emit_optional(&experiment, vocab::HAS_PARADIGM_SPECIFICS, entry.paradigm_specifics());
        self.emit_optional(&experiment, vocab::RDFS_COMMENT, entry.comment_experiment());
        experiment
    }

    fn add_log_entry(&mut self, entry: &Entry) -> Iri {
        let id = self.registry.mint();
        let log_entry = self.local(id);
        self.summary.log_entries += 1;

        self.declare(&log_entry, vocab::SUBJECT_LOG_ENTRY);
        self.emit_started_at(&log_entry, entry);
        if !entry.is_on_diet.is_specified() || !entry.is_initial_weight.is_specified() {
            debug!(entity = %log_entry, "unrecognized flag value written as false");
        }
        self.emit(log_entry.clone(), vocab::HAS_DIET, Literal::boolean(entry.is_on_diet.as_bool()));
        self.emit(
            log_entry.clone(),
            vocab::HAS_INITIAL_WEIGHT_DATE,
            Literal::boolean(entry.is_initial_weight.as_bool()),
        );

        if let Some(grams) = entry.weight {
            let weight = self.blank();
            self.emit(weight.clone(), vocab::HAS_VALUE, Literal::decimal(grams));
            self.emit(weight.clone(), vocab::HAS_UNIT, Literal::string("g"));
            self.emit(log_entry.clone(), vocab::HAS_WEIGHT, Resource::Blank(weight));
        }

        self.emit_optional(&log_entry, vocab::RDFS_COMMENT, entry.comment_subject());
        self.emit_optional(&log_entry, vocab::HAS_FEED, entry.feed());
        log_entry
    }

    fn emit_started_at(&mut self, entity: &Iri, entry: &Entry) {
        match entry.experiment_date {
            Some(ts) => self.emit(entity.clone(), vocab::STARTED_AT, Literal::date_time(ts)),
            None => warn!(entity = %entity, "entry without experiment date, startedAt omitted"),
        }
    }
}
