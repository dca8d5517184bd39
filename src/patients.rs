//! Patient aggregation.
//!
//! The admin screens show one patient's record together with that
//! patient's appointment subset. Appointments do not carry `user_id`;
//! the join key is the patient's email, matched against the identity
//! denormalized onto each appointment.

use thiserror::Error;

use crate::models::{Appointment, AppointmentStatus, FilterCriteria, Patient};

/// Errors from resolving a patient against the loaded collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("User list has not been loaded yet")]
    UsersNotLoaded,
    #[error("No patient found with user id {0}")]
    PatientNotFound(i64),
}

/// One patient plus their appointment subset. The subset is unsorted;
/// display ordering is `schedule::listing`'s job.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientView {
    pub patient: Patient,
    pub appointments: Vec<Appointment>,
}

/// Resolve a patient by `user_id` from the loaded user list and collect
/// their appointments by email join.
pub fn resolve_patient(
    user_id: i64,
    users: &[Patient],
    appointments: &[Appointment],
) -> Result<PatientView, LookupError> {
    if users.is_empty() {
        return Err(LookupError::UsersNotLoaded);
    }
    let patient = users
        .iter()
        .find(|u| u.user_id == user_id)
        .cloned()
        .ok_or(LookupError::PatientNotFound(user_id))?;

    let appointments = appointments
        .iter()
        .filter(|a| a.patient_email == patient.email)
        .cloned()
        .collect();

    Ok(PatientView {
        patient,
        appointments,
    })
}

impl PatientView {
    /// Layer the shared filter predicate over this patient's subset.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| criteria.matches(a))
            .cloned()
            .collect()
    }
}

/// Headline numbers for a patient's record card.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientStats {
    pub total: usize,
    pub confirmed: usize,
    pub paid: usize,
    /// Most recent appointment by (date, time); `None` for a patient
    /// with no appointments yet.
    pub last_appointment: Option<Appointment>,
}

impl PatientStats {
    pub fn compute(appointments: &[Appointment]) -> Self {
        let count = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };
        Self {
            total: appointments.len(),
            confirmed: count(AppointmentStatus::Confirmed),
            paid: count(AppointmentStatus::Paid),
            last_appointment: appointments
                .iter()
                .max_by_key(|a| a.sort_key())
                .cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentKind, StatusFilter};

    fn patient(user_id: i64, email: &str) -> Patient {
        Patient {
            user_id,
            name: "Lucía".into(),
            last_name: "Serrano".into(),
            email: email.into(),
            phone: None,
            avatar_url: None,
        }
    }

    fn appointment(id: i64, email: &str, date: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            date: date.parse().unwrap(),
            time: "09:00".parse().unwrap(),
            kind: AppointmentKind::Online,
            status,
            patient_name: "Lucía".into(),
            patient_last_name: "Serrano".into(),
            patient_email: email.into(),
        }
    }

    #[test]
    fn resolves_the_email_joined_subset() {
        let users = [patient(7, "a@x.com"), patient(8, "b@x.com")];
        let appointments = [
            appointment(1, "a@x.com", "19-01-2025", AppointmentStatus::Pending),
            appointment(2, "b@x.com", "20-01-2025", AppointmentStatus::Pending),
        ];
        let view = resolve_patient(7, &users, &appointments).unwrap();
        assert_eq!(view.patient.user_id, 7);
        let ids: Vec<i64> = view.appointments.iter().map(|a| a.id).collect();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn unknown_user_id_is_not_found() {
        let users = [patient(7, "a@x.com")];
        assert_eq!(
            resolve_patient(9, &users, &[]),
            Err(LookupError::PatientNotFound(9))
        );
    }

    #[test]
    fn empty_user_list_is_its_own_error() {
        assert_eq!(
            resolve_patient(7, &[], &[]),
            Err(LookupError::UsersNotLoaded)
        );
    }

    #[test]
    fn patient_with_no_appointments_resolves_to_empty_subset() {
        let users = [patient(7, "a@x.com")];
        let appointments = [appointment(1, "b@x.com", "19-01-2025", AppointmentStatus::Pending)];
        let view = resolve_patient(7, &users, &appointments).unwrap();
        assert!(view.appointments.is_empty());
    }

    #[test]
    fn view_filter_reuses_the_shared_predicate() {
        let users = [patient(7, "a@x.com")];
        let appointments = [
            appointment(1, "a@x.com", "19-01-2025", AppointmentStatus::Pending),
            appointment(2, "a@x.com", "20-01-2025", AppointmentStatus::Paid),
        ];
        let view = resolve_patient(7, &users, &appointments).unwrap();
        let criteria = FilterCriteria {
            status: StatusFilter::Only(AppointmentStatus::Paid),
            ..Default::default()
        };
        let ids: Vec<i64> = view.filter(&criteria).iter().map(|a| a.id).collect();
        assert_eq!(ids, [2]);
    }

    #[test]
    fn stats_count_by_status() {
        let appointments = [
            appointment(1, "a@x.com", "19-01-2025", AppointmentStatus::Confirmed),
            appointment(2, "a@x.com", "20-01-2025", AppointmentStatus::Confirmed),
            appointment(3, "a@x.com", "21-01-2025", AppointmentStatus::Paid),
            appointment(4, "a@x.com", "22-01-2025", AppointmentStatus::Cancelled),
        ];
        let stats = PatientStats::compute(&appointments);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.confirmed, 2);
        assert_eq!(stats.paid, 1);
    }

    #[test]
    fn stats_pick_the_latest_appointment_by_date_and_time() {
        let mut late = appointment(2, "a@x.com", "20-01-2025", AppointmentStatus::Pending);
        late.time = "17:00".parse().unwrap();
        let appointments = [
            appointment(1, "a@x.com", "20-01-2025", AppointmentStatus::Pending),
            late,
            appointment(3, "a@x.com", "05-01-2025", AppointmentStatus::Pending),
        ];
        let stats = PatientStats::compute(&appointments);
        assert_eq!(stats.last_appointment.unwrap().id, 2);
    }

    #[test]
    fn stats_over_no_appointments_are_zeroed() {
        let stats = PatientStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.last_appointment.is_none());
    }
}
