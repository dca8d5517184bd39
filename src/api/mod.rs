//! Remote appointment API boundary.
//!
//! The core treats the backend purely as a data source/sink. `ClinicApi`
//! is the seam: the workflow and session layers are generic over it, so
//! tests drive them with in-process fakes while the shells use
//! `HttpClinicApi` over reqwest.

pub mod http;
pub mod types;

pub use http::HttpClinicApi;

use thiserror::Error;

use crate::models::{Appointment, AppointmentChanges, AppointmentStatus, NewAppointment, Patient};

/// Errors from talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server rejected the request ({code}): {message}")]
    Status { code: u16, message: String },
    #[error("Malformed response payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The remote operations the client core needs.
///
/// Listing replaces the collection wholesale; the mutating calls feed
/// the store's incremental operations with their results.
#[allow(async_fn_in_trait)]
pub trait ClinicApi {
    /// All appointments (admin scope).
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError>;

    /// One user's own appointments (patient scope, filtered server-side).
    async fn list_user_appointments(&self, user_id: i64) -> Result<Vec<Appointment>, ApiError>;

    /// All registered users.
    async fn list_users(&self) -> Result<Vec<Patient>, ApiError>;

    /// Create an appointment; the server assigns the id and the record
    /// comes back with status pending.
    async fn create_appointment(&self, request: &NewAppointment)
        -> Result<Appointment, ApiError>;

    /// Set an appointment's status.
    async fn update_status(&self, id: i64, status: AppointmentStatus) -> Result<(), ApiError>;

    /// Patch an appointment's date/time/kind. The server rejects edits
    /// of cancelled and paid appointments; the client checks first and
    /// never issues the call for those.
    async fn update_appointment(
        &self,
        id: i64,
        changes: &AppointmentChanges,
    ) -> Result<(), ApiError>;

    /// Delete an appointment.
    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError>;
}
