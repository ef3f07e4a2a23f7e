//! Modal form flow: draft state, validation and submission for one entity.
//!
//! A [`FormController`] is opened in create mode (no record) or edit mode
//! (seeded from a record), accepts field changes, and on submit validates the
//! draft locally before dispatching exactly one mutation through the gateway.
//! The submitting flag is the only lock: while a mutation is in flight
//! further submits are ignored, and `close` may still be called. A mutation
//! that completes after its form session ended leaves the form untouched.

pub mod fields;
pub mod jurusan;
pub mod kelas;
pub mod schema;
pub mod semester;
pub mod tahun_ajaran;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::errors::{AdminError, Result};
use crate::gateway::{MutationGateway, MutationHooks, MutationIntent, RemoteFailure, dispatch};
use crate::notify::Notifier;
use crate::table::TableRecord;
use crate::utils::validate::{FieldErrors, FieldValue, FormField};

pub use jurusan::JurusanSchema;
pub use kelas::KelasSchema;
pub use schema::{EntitySchema, FieldOf, FormDraft};
pub use semester::SemesterSchema;
pub use tahun_ajaran::TahunAjaranSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Closed,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "id")]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    fn intent(self) -> MutationIntent {
        match self {
            FormMode::Create => MutationIntent::Create,
            FormMode::Edit(id) => MutationIntent::Update { id },
        }
    }
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<F> {
    /// Form closed or a mutation already in flight; nothing was sent.
    Ignored,
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors<F>),
    Saved,
    Failed(RemoteFailure),
}

struct FormState<S: EntitySchema> {
    open: bool,
    in_flight: bool,
    // Bumped on every open/close so late completions can tell they are stale
    session: u64,
    mode: FormMode,
    selected: Option<S::Record>,
    draft: S::Draft,
    errors: FieldErrors<FieldOf<S>>,
}

impl<S: EntitySchema> FormState<S> {
    fn closed() -> Self {
        Self {
            open: false,
            in_flight: false,
            session: 0,
            mode: FormMode::Create,
            selected: None,
            draft: S::Draft::default(),
            errors: FieldErrors::new(),
        }
    }

    fn reset_closed(&mut self) {
        self.open = false;
        self.session += 1;
        self.mode = FormMode::Create;
        self.selected = None;
        self.draft = S::Draft::default();
        self.errors.clear();
    }
}

pub struct FormController<S: EntitySchema> {
    state: Arc<Mutex<FormState<S>>>,
    gateway: Arc<dyn MutationGateway>,
    notifier: Arc<dyn Notifier>,
}

impl<S: EntitySchema> FormController<S> {
    pub fn new(gateway: Arc<dyn MutationGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::closed())),
            gateway,
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState<S>> {
        self.state.lock().expect("Form state lock poisoned")
    }

    /// Opens the form in edit mode when `entity` is given, create mode otherwise.
    pub fn open(&self, entity: Option<S::Record>) {
        let mut state = self.lock();
        state.session += 1;
        state.open = true;
        state.errors.clear();
        match entity {
            Some(record) => {
                state.mode = FormMode::Edit(record.row_id());
                state.draft = S::draft_from(&record);
                state.selected = Some(record);
            }
            None => {
                state.mode = FormMode::Create;
                state.draft = S::Draft::default();
                state.selected = None;
            }
        }
        debug!("{} form opened in {:?} mode", S::KIND, state.mode);
    }

    /// Updates one field; a pending error on that field is cleared until the
    /// next submit revalidates.
    pub fn change_field(&self, field: FieldOf<S>, value: impl Into<FieldValue>) -> Result<()> {
        let mut state = self.lock();
        if !state.open {
            return Err(AdminError::form_state(format!("{} form is closed", S::KIND)));
        }
        if state.in_flight {
            return Err(AdminError::form_state(format!(
                "{} form is submitting",
                S::KIND
            )));
        }
        state.draft.set(field, value.into())?;
        state.errors.remove(&field);
        Ok(())
    }

    /// Looks a field up by wire name and updates it.
    pub fn change_field_by_name(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let field = <FieldOf<S> as FormField>::from_name(name).ok_or_else(|| {
            AdminError::unknown_field(format!("{} has no field '{}'", S::KIND, name))
        })?;
        self.change_field(field, value)
    }

    pub async fn submit(&self) -> SubmitOutcome<FieldOf<S>> {
        let (session, mode, payload) = {
            let mut state = self.lock();
            if !state.open || state.in_flight {
                debug!(
                    "{} submit ignored (open: {}, in flight: {})",
                    S::KIND,
                    state.open,
                    state.in_flight
                );
                return SubmitOutcome::Ignored;
            }

            let errors = S::validate(&state.draft);
            if !errors.is_empty() {
                state.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
            let payload = match S::payload(&state.draft) {
                Ok(payload) => payload,
                Err(errors) => {
                    state.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            };
            let payload = match serde_json::to_value(&payload) {
                Ok(value) => value,
                Err(e) => {
                    error!("Failed to encode {} payload: {}", S::KIND, e);
                    let failure = RemoteFailure::transport(e.to_string());
                    self.notifier.error(&failure_message(S::KIND.label(), state.mode));
                    return SubmitOutcome::Failed(failure);
                }
            };

            state.in_flight = true;
            (state.session, state.mode, payload)
        };

        let label = S::KIND.label();
        let hooks = MutationHooks::new()
            .on_success(|| {
                info!("{} saved ({:?})", label, mode);
                self.notifier.success(&success_message(label, mode));
                let mut state = self.lock();
                if state.open && state.session == session {
                    state.reset_closed();
                }
            })
            .on_error(|failure| {
                // Remote field errors are logged only; inline errors stay local.
                warn!(
                    "{} mutation failed ({:?}): {} {:?}",
                    label, failure.status, failure.message, failure.errors
                );
                self.notifier.error(&failure_message(label, mode));
            })
            .on_finish(|| {
                self.lock().in_flight = false;
            });

        match dispatch(self.gateway.as_ref(), S::KIND, mode.intent(), payload, hooks).await {
            Ok(()) => SubmitOutcome::Saved,
            Err(failure) => SubmitOutcome::Failed(failure),
        }
    }

    /// Discards the draft. Idempotent; a mutation still in flight runs to
    /// completion without reopening the form.
    pub fn close(&self) {
        let mut state = self.lock();
        if state.open {
            state.reset_closed();
            debug!("{} form closed", S::KIND);
        }
    }

    pub fn phase(&self) -> FormPhase {
        let state = self.lock();
        match (state.open, state.in_flight) {
            (false, _) => FormPhase::Closed,
            (true, true) => FormPhase::Submitting,
            (true, false) => FormPhase::Editing,
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().in_flight
    }

    pub fn mode(&self) -> FormMode {
        self.lock().mode
    }

    pub fn draft(&self) -> S::Draft {
        self.lock().draft.clone()
    }

    pub fn errors(&self) -> FieldErrors<FieldOf<S>> {
        self.lock().errors.clone()
    }

    pub fn selected(&self) -> Option<S::Record> {
        self.lock().selected.clone()
    }
}

fn success_message(label: &str, mode: FormMode) -> String {
    match mode {
        FormMode::Create => format!("{label} berhasil ditambahkan"),
        FormMode::Edit(_) => format!("{label} berhasil diperbarui"),
    }
}

fn failure_message(label: &str, mode: FormMode) -> String {
    match mode {
        FormMode::Create => format!("Gagal menambahkan {label}"),
        FormMode::Edit(_) => format!("Gagal memperbarui {label}"),
    }
}

/// Error map keyed by wire field name, for responses.
pub fn errors_by_name<F: FormField>(
    errors: &FieldErrors<F>,
) -> std::collections::BTreeMap<&'static str, String> {
    errors
        .iter()
        .map(|(field, message)| (field.name(), message.clone()))
        .collect()
}
