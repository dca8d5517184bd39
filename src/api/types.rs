//! Wire payloads for the appointment API.
//!
//! Responses wrap their payload in a `{ "data": ... }` envelope. Request
//! bodies use the backend's camelCase field names (`appoDate`,
//! `appoTime`, `appoType`); error bodies carry `message` or `msg`
//! depending on the endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{AppointmentChanges, AppointmentKind, AppointmentStatus, NewAppointment};
use crate::schedule::wire::{WireDate, WireTime};

/// The `{ "data": ... }` envelope around successful responses.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Error body shape; which field is populated varies by endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.msg)
    }
}

/// POST body for creating an appointment. Every new appointment is
/// created pending.
#[derive(Debug, Serialize)]
pub struct CreateAppointmentBody {
    pub user_id: i64,
    #[serde(rename = "appoDate")]
    pub date: WireDate,
    #[serde(rename = "appoTime")]
    pub time: WireTime,
    #[serde(rename = "appoType")]
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
}

impl From<&NewAppointment> for CreateAppointmentBody {
    fn from(request: &NewAppointment) -> Self {
        Self {
            user_id: request.user_id,
            date: request.date,
            time: request.time,
            kind: request.kind,
            status: AppointmentStatus::Pending,
        }
    }
}

/// PUT body for a status change.
#[derive(Debug, Serialize)]
pub struct UpdateStatusBody {
    pub appo_id: i64,
    pub status: AppointmentStatus,
}

/// PUT body for a field edit; unset fields are omitted so the server
/// keeps their current values.
#[derive(Debug, Serialize)]
pub struct UpdateAppointmentBody {
    #[serde(rename = "appoDate", skip_serializing_if = "Option::is_none")]
    pub date: Option<WireDate>,
    #[serde(rename = "appoTime", skip_serializing_if = "Option::is_none")]
    pub time: Option<WireTime>,
    #[serde(rename = "appoType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentKind>,
}

impl From<&AppointmentChanges> for UpdateAppointmentBody {
    fn from(changes: &AppointmentChanges) -> Self {
        Self {
            date: changes.date,
            time: changes.time,
            kind: changes.kind,
        }
    }
}
