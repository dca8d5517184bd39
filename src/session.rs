//! Shared application state.
//!
//! `SessionState` is the single injectable container a shell owns for the
//! lifetime of a login session: the appointment collection plus the user
//! list, each behind an `RwLock` so screens read concurrently while
//! mutations serialize. Only the store's operations (`store::AppointmentBook`)
//! mutate the collection; everything else reads.
//!
//! Hydration helpers drive the fetch → replace-all flow and keep the
//! loading/error flags coherent. Guards are never held across an await.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::api::{ApiError, ClinicApi};
use crate::models::{Appointment, NewAppointment, Patient};
use crate::patients::{self, LookupError, PatientView};
use crate::store::AppointmentBook;

/// Errors from session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Per-login shared state. Wrap in `Arc` at startup and hand references
/// to every screen and workflow.
#[derive(Debug, Default)]
pub struct SessionState {
    book: RwLock<AppointmentBook>,
    users: RwLock<Vec<Patient>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Collection access ─────────────────────────────────

    pub fn read_book(&self) -> Result<RwLockReadGuard<'_, AppointmentBook>, SessionError> {
        self.book.read().map_err(|_| SessionError::LockPoisoned)
    }

    pub fn write_book(&self) -> Result<RwLockWriteGuard<'_, AppointmentBook>, SessionError> {
        self.book.write().map_err(|_| SessionError::LockPoisoned)
    }

    /// Snapshot the collection's load generation. Async callers compare
    /// it after awaiting and discard results when it moved.
    pub fn book_generation(&self) -> Result<u64, SessionError> {
        Ok(self.read_book()?.generation())
    }

    // ── User list access ──────────────────────────────────

    pub fn read_users(&self) -> Result<RwLockReadGuard<'_, Vec<Patient>>, SessionError> {
        self.users.read().map_err(|_| SessionError::LockPoisoned)
    }

    pub fn write_users(&self) -> Result<RwLockWriteGuard<'_, Vec<Patient>>, SessionError> {
        self.users.write().map_err(|_| SessionError::LockPoisoned)
    }

    // ── Hydration ─────────────────────────────────────────

    /// Fetch every appointment (admin scope) and replace the collection.
    pub async fn load_appointments<C: ClinicApi>(&self, api: &C) -> Result<usize, SessionError> {
        self.write_book()?.set_loading(true);
        match api.list_appointments().await {
            Ok(items) => {
                let count = items.len();
                self.write_book()?.replace_all(items);
                tracing::debug!(count, "Appointment collection replaced");
                Ok(count)
            }
            Err(e) => {
                self.write_book()?.set_error(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Fetch one user's own appointments (patient scope) and replace the
    /// collection.
    pub async fn load_user_appointments<C: ClinicApi>(
        &self,
        api: &C,
        user_id: i64,
    ) -> Result<usize, SessionError> {
        self.write_book()?.set_loading(true);
        match api.list_user_appointments(user_id).await {
            Ok(items) => {
                let count = items.len();
                self.write_book()?.replace_all(items);
                tracing::debug!(count, user_id, "Patient appointment collection replaced");
                Ok(count)
            }
            Err(e) => {
                self.write_book()?.set_error(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Fetch the registered user list.
    pub async fn load_users<C: ClinicApi>(&self, api: &C) -> Result<usize, SessionError> {
        let users = api.list_users().await?;
        let count = users.len();
        *self.write_users()? = users;
        tracing::debug!(count, "User list replaced");
        Ok(count)
    }

    /// Request a new appointment and fold the created record into the
    /// collection. Results landing after a reload are dropped instead of
    /// resurrecting stale state.
    pub async fn request_appointment<C: ClinicApi>(
        &self,
        api: &C,
        request: &NewAppointment,
    ) -> Result<Appointment, SessionError> {
        let generation = self.book_generation()?;
        let created = api.create_appointment(request).await?;
        let mut book = self.write_book()?;
        if book.generation() == generation {
            book.add(created.clone());
        } else {
            tracing::debug!(id = created.id, "Created appointment arrived after reload; not folded in");
        }
        Ok(created)
    }

    // ── Derived views ─────────────────────────────────────

    /// Resolve one patient's record and appointment subset from the
    /// loaded collections.
    pub fn patient_view(&self, user_id: i64) -> Result<PatientView, SessionError> {
        let users = self.read_users()?;
        let book = self.read_book()?;
        Ok(patients::resolve_patient(user_id, &users, book.all())?)
    }
}
