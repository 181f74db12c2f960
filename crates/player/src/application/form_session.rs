//! Form Session - the controller for one form-filling session
//!
//! Owns everything a session accumulates (the loaded schema, the section
//! cursor, the answers, the displayed errors) and exposes the user actions
//! `on_change`, `on_toggle`, `on_next`, `on_prev` and `on_submit`.
//!
//! # Lifecycle
//!
//! ```text
//!   new ──► Loading ──(fetch ok)──► Loaded ──(teardown)──► Closed
//!              │
//!              └──(fetch err)──► Failed ──(teardown)──► Closed
//! ```
//!
//! The schema fetch is the only suspension point. It is split into
//! [`FormSession::begin_load`] and [`FormSession::complete_load`] so that a
//! result arriving after [`FormSession::teardown`] (or for a superseded ticket)
//! is dropped instead of resurrecting the session. [`FormSession::load`] runs
//! both halves against a `FormSourcePort`.
//!
//! After every state change the session presents a fresh [`SessionView`] to
//! its render surface, if one is attached.

use std::collections::HashSet;
use std::sync::Arc;

use formwalk_domain::{
    validate_section, AnswerValue, DomainError, ErrorMap, FieldDefinition, FormSchema,
    FormSection, FormValues, SectionCursor,
};

use crate::application::view::{FieldView, FormView, SessionView, SubmissionStatus};
use crate::ports::outbound::{
    FetchError, FormSinkPort, FormSourcePort, RenderSurfacePort, SubmitError,
};
use crate::session_types::{FormSessionId, FormSubmission, SessionKey};

/// Misuse of a session: an action that is not available in its current state.
///
/// Field validation failures are *not* `SessionError`s; they land in the
/// error map and show up in the view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("The form is still loading")]
    NotLoaded,
    #[error("The form could not be loaded: {0}")]
    LoadFailed(FetchError),
    #[error("The form session has been closed")]
    Closed,
    #[error("The form is already loaded")]
    AlreadyLoaded,
    #[error("A form fetch is already in flight")]
    FetchInFlight,
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Field '{field_id}' has no option '{option}'")]
    UnknownOption { field_id: String, option: String },
    #[error("Field '{field_id}' selects option '{option}' more than once")]
    DuplicateOption { field_id: String, option: String },
    #[error("Field '{0}' is not a checkbox group")]
    NotMultiSelect(String),
    #[error(transparent)]
    Navigation(#[from] DomainError),
}

/// Proof that a fetch was started by this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket(u64);

/// What happened to a fetch result handed to `complete_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// Session closed or ticket superseded; result dropped
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced { section_index: usize },
    /// Current section has errors; they are now on display
    Blocked { error_count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The sink accepted the answers
    Submitted,
    /// Last section has errors; nothing was sent
    Blocked { error_count: usize },
    /// The sink refused; answers are untouched and submit may be retried
    Rejected(SubmitError),
}

/// State of a loaded form.
#[derive(Debug, Clone)]
struct LoadedForm {
    schema: FormSchema,
    cursor: SectionCursor,
    values: FormValues,
    errors: ErrorMap,
    submission: SubmissionStatus,
}

impl LoadedForm {
    fn new(schema: FormSchema) -> Result<Self, DomainError> {
        let cursor = SectionCursor::new(schema.section_count())?;
        Ok(Self {
            schema,
            cursor,
            values: FormValues::new(),
            errors: ErrorMap::new(),
            submission: SubmissionStatus::NotSubmitted,
        })
    }

    fn current_section(&self) -> Result<&FormSection, DomainError> {
        self.schema
            .section(self.cursor.current())
            .ok_or_else(|| DomainError::not_found("section", self.cursor.current().to_string()))
    }

    fn field(&self, field_id: &str) -> Result<&FieldDefinition, SessionError> {
        self.schema
            .field(field_id)
            .ok_or_else(|| SessionError::UnknownField(field_id.to_string()))
    }

    fn view(&self) -> SessionView {
        let Ok(section) = self.current_section() else {
            return SessionView::Failed {
                message: "Current section is missing from the form".to_string(),
            };
        };
        SessionView::Form(FormView {
            form_title: self.schema.form_title().to_string(),
            section_index: self.cursor.current(),
            section_count: self.cursor.section_count(),
            section_id: section.section_id.to_string(),
            section_title: section.title.clone(),
            section_description: section.description.clone(),
            fields: section
                .fields
                .iter()
                .map(|f| FieldView::build(f, &self.values, &self.errors))
                .collect(),
            actions: self.cursor.actions(),
            submission: self.submission.clone(),
        })
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    Loaded(Box<LoadedForm>),
    Failed(FetchError),
    Closed,
}

/// One user's pass through one form.
pub struct FormSession {
    id: FormSessionId,
    session_key: SessionKey,
    phase: Phase,
    in_flight: Option<u64>,
    next_ticket: u64,
    surface: Option<Arc<dyn RenderSurfacePort>>,
}

impl FormSession {
    /// A session in the Loading state with no fetch started yet.
    pub fn new(session_key: SessionKey) -> Self {
        Self {
            id: FormSessionId::new(),
            session_key,
            phase: Phase::Loading,
            in_flight: None,
            next_ticket: 0,
            surface: None,
        }
    }

    /// Present views to `surface` after every state change.
    pub fn with_surface(mut self, surface: Arc<dyn RenderSurfacePort>) -> Self {
        self.surface = Some(surface);
        self.emit();
        self
    }

    pub fn id(&self) -> FormSessionId {
        self.id
    }

    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, Phase::Loaded(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed)
    }

    /// The fetch error, if loading failed.
    pub fn load_error(&self) -> Option<&FetchError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn schema(&self) -> Option<&FormSchema> {
        self.loaded().ok().map(|f| &f.schema)
    }

    /// Zero-based index of the section on screen.
    pub fn current_section(&self) -> Option<usize> {
        self.loaded().ok().map(|f| f.cursor.current())
    }

    pub fn values(&self) -> Option<&FormValues> {
        self.loaded().ok().map(|f| &f.values)
    }

    pub fn value(&self, field_id: &str) -> Option<&AnswerValue> {
        self.values().and_then(|v| v.get(field_id))
    }

    pub fn errors(&self) -> Option<&ErrorMap> {
        self.loaded().ok().map(|f| &f.errors)
    }

    /// Snapshot of what should be on screen.
    pub fn render(&self) -> SessionView {
        match &self.phase {
            Phase::Loading => SessionView::Loading,
            Phase::Failed(err) => SessionView::Failed {
                message: err.to_string(),
            },
            Phase::Loaded(form) => form.view(),
            Phase::Closed => SessionView::Closed,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Start a fetch. Only one may be outstanding.
    pub fn begin_load(&mut self) -> Result<LoadTicket, SessionError> {
        match &self.phase {
            Phase::Loading => {}
            Phase::Closed => return Err(SessionError::Closed),
            Phase::Loaded(_) => return Err(SessionError::AlreadyLoaded),
            Phase::Failed(err) => return Err(SessionError::LoadFailed(err.clone())),
        }
        if self.in_flight.is_some() {
            return Err(SessionError::FetchInFlight);
        }
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        tracing::debug!(session_id = %self.id, session_key = %self.session_key, "Fetching form");
        Ok(LoadTicket(self.next_ticket))
    }

    /// Deliver the result of the fetch started with `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<FormSchema, FetchError>,
    ) -> LoadOutcome {
        if self.is_closed() || self.in_flight != Some(ticket.0) {
            tracing::debug!(session_id = %self.id, "Dropping late form fetch result");
            return LoadOutcome::Ignored;
        }
        self.in_flight = None;

        let outcome = match result.and_then(|schema| {
            LoadedForm::new(schema).map_err(|e| FetchError::InvalidResponse(e.to_string()))
        }) {
            Ok(form) => {
                tracing::info!(
                    session_id = %self.id,
                    form_title = %form.schema.form_title(),
                    sections = form.schema.section_count(),
                    "Form loaded"
                );
                self.phase = Phase::Loaded(Box::new(form));
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::error!(session_id = %self.id, error = %err, "Failed to fetch form");
                self.phase = Phase::Failed(err);
                LoadOutcome::Failed
            }
        };
        self.emit();
        outcome
    }

    /// Fetch the form from `source` and settle the session into Loaded or Failed.
    pub async fn load(&mut self, source: &dyn FormSourcePort) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_load()?;
        let result = source.fetch_form(self.session_key.clone()).await;
        Ok(self.complete_load(ticket, result))
    }

    /// End the session. Any outstanding fetch result will be ignored.
    pub fn teardown(&mut self) {
        if self.is_closed() {
            return;
        }
        tracing::debug!(session_id = %self.id, "Form session closed");
        self.phase = Phase::Closed;
        self.in_flight = None;
        self.emit();
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Store `value` for `field_id` and drop that field's displayed error.
    ///
    /// Does not re-validate. For dropdown and radio fields a non-empty value
    /// must be one of the options. For checkbox groups every selection must be
    /// an option, each at most once.
    pub fn on_change(
        &mut self,
        field_id: &str,
        value: impl Into<AnswerValue>,
    ) -> Result<(), SessionError> {
        let value = value.into();
        let form = self.loaded_mut()?;
        let field = form.field(field_id)?;
        check_choice_value(field, &value)?;

        let id = field.field_id.clone();
        form.errors.clear_field(field_id);
        form.values.set(id, value);
        self.emit();
        Ok(())
    }

    /// Check or uncheck one option of a checkbox group.
    pub fn on_toggle(
        &mut self,
        field_id: &str,
        option: &str,
        checked: bool,
    ) -> Result<(), SessionError> {
        let form = self.loaded_mut()?;
        let field = form.field(field_id)?;
        if !field.field_type.is_multi_select() {
            return Err(SessionError::NotMultiSelect(field_id.to_string()));
        }
        if field.option(option).is_none() {
            return Err(SessionError::UnknownOption {
                field_id: field_id.to_string(),
                option: option.to_string(),
            });
        }

        let id = field.field_id.clone();
        form.errors.clear_field(field_id);
        form.values.toggle(id, option, checked);
        self.emit();
        Ok(())
    }

    /// Validate the current section and move forward if it passes.
    pub fn on_next(&mut self) -> Result<NextOutcome, SessionError> {
        let session_id = self.id;
        let form = self.loaded_mut()?;
        if form.cursor.is_last() {
            return Err(DomainError::invalid_state_transition(
                "Already on the last section; submit instead",
            )
            .into());
        }

        let report = validate_section(form.current_section()?, &form.values);
        let advanced = form.cursor.advance(&report)?;
        let error_count = report.errors.len();
        form.errors = report.into_errors();

        let outcome = if advanced {
            tracing::info!(%session_id, section = form.cursor.current(), "Advanced to next section");
            NextOutcome::Advanced {
                section_index: form.cursor.current(),
            }
        } else {
            tracing::debug!(
                %session_id,
                section = form.cursor.current(),
                error_count,
                "Section has errors"
            );
            NextOutcome::Blocked { error_count }
        };
        self.emit();
        Ok(outcome)
    }

    /// Go back one section. Answers are kept; displayed errors are cleared.
    pub fn on_prev(&mut self) -> Result<usize, SessionError> {
        let form = self.loaded_mut()?;
        form.cursor.retreat()?;
        form.errors = ErrorMap::new();
        let section = form.cursor.current();
        self.emit();
        Ok(section)
    }

    /// Validate the last section and, if it passes, hand the answers to `sink`.
    ///
    /// May be called again after success or rejection; each call re-validates
    /// and, when valid, submits again.
    pub async fn on_submit(
        &mut self,
        sink: &dyn FormSinkPort,
    ) -> Result<SubmitOutcome, SessionError> {
        let session_id = self.id;
        let session_key = self.session_key.clone();
        let form = self.loaded_mut()?;

        let report = validate_section(form.current_section()?, &form.values);
        let may_submit = form.cursor.can_submit(&report)?;
        let error_count = report.errors.len();
        form.errors = report.into_errors();

        if !may_submit {
            tracing::debug!(%session_id, error_count, "Submit blocked by validation errors");
            self.emit();
            return Ok(SubmitOutcome::Blocked { error_count });
        }

        let submission = FormSubmission {
            session_key,
            form_title: form.schema.form_title().to_string(),
            form_id: form.schema.form_id().map(str::to_string),
            values: form.values.clone(),
        };

        let outcome = match sink.submit(submission).await {
            Ok(()) => {
                tracing::info!(%session_id, answers = form.values.len(), "Form submitted");
                form.submission = SubmissionStatus::Submitted;
                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::warn!(%session_id, error = %err, "Form sink rejected submission");
                form.submission = SubmissionStatus::Rejected {
                    message: err.to_string(),
                };
                SubmitOutcome::Rejected(err)
            }
        };
        self.emit();
        Ok(outcome)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn loaded(&self) -> Result<&LoadedForm, SessionError> {
        match &self.phase {
            Phase::Loaded(form) => Ok(&**form),
            Phase::Loading => Err(SessionError::NotLoaded),
            Phase::Failed(err) => Err(SessionError::LoadFailed(err.clone())),
            Phase::Closed => Err(SessionError::Closed),
        }
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedForm, SessionError> {
        match &mut self.phase {
            Phase::Loaded(form) => Ok(&mut **form),
            Phase::Loading => Err(SessionError::NotLoaded),
            Phase::Failed(err) => Err(SessionError::LoadFailed(err.clone())),
            Phase::Closed => Err(SessionError::Closed),
        }
    }

    fn emit(&self) {
        if let Some(surface) = &self.surface {
            surface.present(&self.render());
        }
    }
}

/// Reject answers to choice fields that name something other than their options.
fn check_choice_value(field: &FieldDefinition, value: &AnswerValue) -> Result<(), SessionError> {
    if !field.field_type.is_choice() || value.is_empty() {
        return Ok(());
    }
    let unknown = |option: &str| SessionError::UnknownOption {
        field_id: field.field_id.to_string(),
        option: option.to_string(),
    };

    if !field.field_type.is_multi_select() {
        return match field.option(value.as_str()) {
            Some(_) => Ok(()),
            None => Err(unknown(value.as_str())),
        };
    }

    let mut seen = HashSet::new();
    for selection in value.selections() {
        if field.option(selection).is_none() {
            return Err(unknown(selection));
        }
        if !seen.insert(selection) {
            return Err(SessionError::DuplicateOption {
                field_id: field.field_id.to_string(),
                option: selection.to_string(),
            });
        }
    }
    Ok(())
}
