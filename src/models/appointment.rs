use serde::{Deserialize, Serialize};

use crate::schedule::wire::{WireDate, WireTime};

use super::enums::{AppointmentKind, AppointmentStatus};

/// A booked or requested session, as returned by the appointment API.
///
/// `id` is assigned by the remote source and immutable once assigned.
/// Patient identity is denormalized onto the record at creation time; the
/// join back to a `Patient` is by email (see `patients::resolve_patient`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "appo_id")]
    pub id: i64,
    #[serde(rename = "appodate")]
    pub date: WireDate,
    #[serde(rename = "appotime")]
    pub time: WireTime,
    #[serde(rename = "appotype")]
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    #[serde(rename = "name")]
    pub patient_name: String,
    #[serde(rename = "last_name")]
    pub patient_last_name: String,
    #[serde(rename = "email")]
    pub patient_email: String,
}

impl Appointment {
    /// Chronological sort key. Same-day appointments order by time,
    /// never by insertion order or id.
    pub fn sort_key(&self) -> (WireDate, WireTime) {
        (self.date, self.time)
    }
}

/// Payload for requesting a new appointment. Status is not a field:
/// every new appointment starts out pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub user_id: i64,
    pub date: WireDate,
    pub time: WireTime,
    pub kind: AppointmentKind,
}

/// A partial edit of an appointment's schedulable fields. Fields left
/// `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentChanges {
    pub date: Option<WireDate>,
    pub time: Option<WireTime>,
    pub kind: Option<AppointmentKind>,
}

impl AppointmentChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.kind.is_none()
    }

    /// Whether applying this edit would actually change the appointment.
    pub fn changes(&self, appointment: &Appointment) -> bool {
        self.date.is_some_and(|d| d != appointment.date)
            || self.time.is_some_and(|t| t != appointment.time)
            || self.kind.is_some_and(|k| k != appointment.kind)
    }

    pub fn apply_to(&self, appointment: &mut Appointment) {
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time;
        }
        if let Some(kind) = self.kind {
            appointment.kind = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample() -> Appointment {
        Appointment {
            id: 41,
            date: "20-01-2025".parse().unwrap(),
            time: "09:00".parse().unwrap(),
            kind: AppointmentKind::Online,
            status: AppointmentStatus::Pending,
            patient_name: "Lucía".into(),
            patient_last_name: "Serrano".into(),
            patient_email: "lucia@example.com".into(),
        }
    }

    #[test]
    fn deserializes_wire_field_names() {
        let json = r#"{
            "appo_id": 7,
            "appodate": "25-11-2024",
            "appotime": "11:00",
            "appotype": "face-to-face",
            "status": "confirmed",
            "name": "Marta",
            "last_name": "Ibáñez",
            "email": "marta@example.com"
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, 7);
        assert_eq!(appointment.date.to_string(), "25-11-2024");
        assert_eq!(appointment.time.to_string(), "11:00");
        assert_eq!(appointment.kind, AppointmentKind::FaceToFace);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.patient_email, "marta@example.com");
    }

    #[test]
    fn serializes_back_to_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["appo_id"], 41);
        assert_eq!(value["appodate"], "20-01-2025");
        assert_eq!(value["appotime"], "09:00");
        assert_eq!(value["appotype"], "online");
        assert_eq!(value["name"], "Lucía");
    }

    #[test]
    fn rejects_unknown_status_at_the_boundary() {
        let json = r#"{
            "appo_id": 7,
            "appodate": "25-11-2024",
            "appotime": "11:00",
            "appotype": "online",
            "status": "rescheduled",
            "name": "Marta",
            "last_name": "Ibáñez",
            "email": "marta@example.com"
        }"#;
        assert!(serde_json::from_str::<Appointment>(json).is_err());
    }

    #[test]
    fn empty_changes_do_nothing() {
        let mut appointment = sample();
        let before = appointment.clone();
        let changes = AppointmentChanges::default();
        assert!(changes.is_empty());
        assert!(!changes.changes(&appointment));
        changes.apply_to(&mut appointment);
        assert_eq!(appointment, before);
    }

    #[test]
    fn partial_changes_apply_only_set_fields() {
        let mut appointment = sample();
        let changes = AppointmentChanges {
            time: Some("17:00".parse().unwrap()),
            ..Default::default()
        };
        assert!(changes.changes(&appointment));
        changes.apply_to(&mut appointment);
        assert_eq!(appointment.time.to_string(), "17:00");
        assert_eq!(appointment.date.to_string(), "20-01-2025");
        assert_eq!(appointment.kind, AppointmentKind::Online);
    }

    #[test]
    fn changes_matching_current_values_are_not_changes() {
        let appointment = sample();
        let changes = AppointmentChanges {
            date: Some(appointment.date),
            time: Some(appointment.time),
            kind: Some(appointment.kind),
        };
        assert!(!changes.changes(&appointment));
    }
}
