pub mod appointment;
pub mod enums;
pub mod filters;
pub mod patient;

pub use appointment::{Appointment, AppointmentChanges, NewAppointment};
pub use enums::{AppointmentKind, AppointmentStatus};
pub use filters::{FilterCriteria, FilterPatch, KindFilter, StatusFilter};
pub use patient::Patient;

use thiserror::Error;

/// Errors raised while building model values from wire data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
