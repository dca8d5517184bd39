//! Confirm → submit → apply workflow for appointment mutations.
//!
//! Every mutating action (status change, reschedule, deletion) moves
//! through the same machine: `Idle → PendingConfirmation → Submitting →
//! Idle`. Validation happens before the confirmation prompt and never
//! issues a network call; confirmation issues exactly one call; the
//! store is only touched after the call succeeds, so a failed attempt
//! leaves the displayed data intact and the action retryable.
//!
//! The phase lives behind a `Mutex` on `&self`, which is what enforces
//! the "disabled while submitting" invariant: a second `confirm` during
//! `Submitting` is ignored rather than issuing a second call. Results
//! that land after the collection was reloaded are discarded instead of
//! mutating state the user is no longer looking at.

use std::sync::Mutex;

use thiserror::Error;

use crate::api::{ApiError, ClinicApi};
use crate::models::{Appointment, AppointmentChanges, AppointmentStatus};
use crate::session::{SessionError, SessionState};
use crate::store::StoreError;

/// A mutation the user is asking for.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    ChangeStatus { id: i64, to: AppointmentStatus },
    Reschedule { id: i64, changes: AppointmentChanges },
    Delete { id: i64 },
}

impl MutationRequest {
    fn id(&self) -> i64 {
        match self {
            Self::ChangeStatus { id, .. } | Self::Reschedule { id, .. } | Self::Delete { id } => {
                *id
            }
        }
    }
}

/// Errors surfaced by the workflow before or after submission.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Select a date and time before saving")]
    MissingSchedule,
    #[error("No changes to save")]
    NoChanges,
    #[error("Appointment {id} is {status} and can no longer be edited")]
    EditLocked { id: i64, status: AppointmentStatus },
    #[error("Appointment {0} is not in the loaded collection")]
    UnknownAppointment(i64),
    #[error("Another change is already in progress")]
    Busy,
    #[error("The server rejected the change: {0}")]
    Remote(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Internal lock error")]
    LockPoisoned,
}

/// Human-readable confirmation content, shown before anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    /// Patient and schedule context for the dialog body.
    pub detail: String,
}

/// How a confirmed submission ended.
#[derive(Debug)]
pub enum Outcome {
    /// The call succeeded and the store was updated.
    Applied,
    /// There was nothing to confirm, or a submission is already in
    /// flight; no call was made.
    Ignored,
    /// The call succeeded but the collection was reloaded while it was
    /// in flight; the late result was dropped.
    Discarded,
    /// The call or the local apply failed; the store is untouched.
    Failed(WorkflowError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Externally observable workflow phase, for enabling/disabling actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    PendingConfirmation,
    Submitting,
}

enum Phase {
    Idle,
    PendingConfirmation(MutationRequest),
    Submitting,
}

/// One appointment-mutation workflow instance. A shell typically owns
/// one per editing surface.
#[derive(Default)]
pub struct MutationFlow {
    phase: Mutex<Phase>,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

impl MutationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PhaseKind {
        self.phase
            .lock()
            .map(|phase| match *phase {
                Phase::Idle => PhaseKind::Idle,
                Phase::PendingConfirmation(_) => PhaseKind::PendingConfirmation,
                Phase::Submitting => PhaseKind::Submitting,
            })
            .unwrap_or(PhaseKind::Idle)
    }

    /// Validate a mutation and stage it for confirmation.
    ///
    /// Local precondition failures (unknown id, frozen appointment,
    /// empty or no-op edits) surface here, before any prompt and before
    /// any network traffic.
    pub fn request(
        &self,
        session: &SessionState,
        request: MutationRequest,
    ) -> Result<ConfirmationPrompt, WorkflowError> {
        let snapshot = {
            let book = session.read_book()?;
            book.find(request.id())
                .cloned()
                .ok_or(WorkflowError::UnknownAppointment(request.id()))?
        };

        let prompt = match &request {
            MutationRequest::ChangeStatus { to, .. } => prompt_for_status(&snapshot, *to),
            MutationRequest::Reschedule { changes, .. } => {
                if changes.is_empty() {
                    return Err(WorkflowError::MissingSchedule);
                }
                if !snapshot.status.is_editable() {
                    return Err(WorkflowError::EditLocked {
                        id: snapshot.id,
                        status: snapshot.status,
                    });
                }
                if !changes.changes(&snapshot) {
                    return Err(WorkflowError::NoChanges);
                }
                prompt_for_reschedule(&snapshot, changes)
            }
            MutationRequest::Delete { .. } => prompt_for_delete(&snapshot),
        };

        let mut phase = self.phase.lock().map_err(|_| WorkflowError::LockPoisoned)?;
        if !matches!(*phase, Phase::Idle) {
            return Err(WorkflowError::Busy);
        }
        *phase = Phase::PendingConfirmation(request);
        Ok(prompt)
    }

    /// Discard the staged mutation. A submission already in flight is
    /// not cancelled; only the local decision is.
    pub fn cancel(&self) {
        if let Ok(mut phase) = self.phase.lock() {
            if matches!(*phase, Phase::PendingConfirmation(_)) {
                *phase = Phase::Idle;
            }
        }
    }

    /// Submit the staged mutation: exactly one network call, store
    /// updated only on success, phase back to `Idle` either way.
    ///
    /// Calling this with nothing staged — including while a previous
    /// confirm is still submitting — returns `Outcome::Ignored` without
    /// touching the network.
    pub async fn confirm<C: ClinicApi>(&self, api: &C, session: &SessionState) -> Outcome {
        let request = {
            let Ok(mut phase) = self.phase.lock() else {
                return Outcome::Failed(WorkflowError::LockPoisoned);
            };
            match std::mem::take(&mut *phase) {
                Phase::PendingConfirmation(request) => {
                    *phase = Phase::Submitting;
                    request
                }
                other => {
                    *phase = other;
                    return Outcome::Ignored;
                }
            }
        };

        let generation = match session.book_generation() {
            Ok(generation) => generation,
            Err(e) => {
                self.finish();
                return Outcome::Failed(e.into());
            }
        };

        let sent = match &request {
            MutationRequest::ChangeStatus { id, to } => api.update_status(*id, *to).await,
            MutationRequest::Reschedule { id, changes } => {
                api.update_appointment(*id, changes).await
            }
            MutationRequest::Delete { id } => api.delete_appointment(*id).await,
        };
        self.finish();

        if let Err(e) = sent {
            tracing::warn!(id = request.id(), error = %e, "Appointment mutation rejected");
            return Outcome::Failed(e.into());
        }

        let mut book = match session.write_book() {
            Ok(book) => book,
            Err(e) => return Outcome::Failed(e.into()),
        };
        if book.generation() != generation {
            tracing::debug!(id = request.id(), "Mutation result arrived after reload; dropped");
            return Outcome::Discarded;
        }

        match request {
            MutationRequest::ChangeStatus { id, to } => {
                book.update_status(id, to);
            }
            MutationRequest::Reschedule { id, changes } => {
                if let Err(e) = book.update_fields(id, &changes) {
                    return Outcome::Failed(e.into());
                }
            }
            MutationRequest::Delete { id } => book.remove(id),
        }
        Outcome::Applied
    }

    fn finish(&self) {
        if let Ok(mut phase) = self.phase.lock() {
            *phase = Phase::Idle;
        }
    }
}

fn schedule_line(appointment: &Appointment) -> String {
    format!(
        "{} {} — {} {}",
        appointment.patient_name, appointment.patient_last_name, appointment.date,
        appointment.time
    )
}

fn prompt_for_status(appointment: &Appointment, to: AppointmentStatus) -> ConfirmationPrompt {
    ConfirmationPrompt {
        title: "Confirm status change".into(),
        message: format!(
            "Change this appointment from \"{}\" to \"{}\"?",
            appointment.status, to
        ),
        detail: schedule_line(appointment),
    }
}

fn prompt_for_reschedule(
    appointment: &Appointment,
    changes: &AppointmentChanges,
) -> ConfirmationPrompt {
    let mut after = appointment.clone();
    changes.apply_to(&mut after);
    ConfirmationPrompt {
        title: "Confirm changes".into(),
        message: format!(
            "Move this appointment from {} {} ({}) to {} {} ({})?",
            appointment.date,
            appointment.time,
            appointment.kind,
            after.date,
            after.time,
            after.kind
        ),
        detail: schedule_line(appointment),
    }
}

fn prompt_for_delete(appointment: &Appointment) -> ConfirmationPrompt {
    ConfirmationPrompt {
        title: "Delete appointment".into(),
        message: "Deleting this appointment is permanent and cannot be undone.".into(),
        detail: schedule_line(appointment),
    }
}
