//! Sort/partition views over the appointment collection.
//!
//! Two display orders exist: "upcoming" (today or later, soonest first)
//! and "history" (most recent first, paginated). Ties on the same date
//! always break by time — never by insertion order or id. Inputs are
//! assumed well-formed; malformed dates are rejected upstream at the API
//! boundary, not here.

use chrono::Weekday;

use crate::models::{Appointment, AppointmentStatus};

use super::wire::WireDate;

/// Page size for the history view; callers request more pages for
/// "show more".
pub const HISTORY_PAGE_SIZE: usize = 20;

/// Statuses shown by the admin dashboard's "next 3" widget.
pub const ADMIN_WIDGET_STATUSES: [AppointmentStatus; 2] =
    [AppointmentStatus::Pending, AppointmentStatus::Confirmed];

/// Statuses shown by the patient dashboard's "next 3" widget. Paid
/// sessions stay visible there; only cancelled ones are hidden.
pub const PATIENT_WIDGET_STATUSES: [AppointmentStatus; 3] = [
    AppointmentStatus::Pending,
    AppointmentStatus::Confirmed,
    AppointmentStatus::Paid,
];

/// Appointments dated today or later, excluding cancelled ones, ordered
/// soonest first. No pagination: the upcoming view always shows everything.
pub fn upcoming(appointments: &[Appointment], today: WireDate) -> Vec<Appointment> {
    let mut kept: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.status != AppointmentStatus::Cancelled && a.date >= today)
        .cloned()
        .collect();
    kept.sort_by_key(Appointment::sort_key);
    kept
}

/// All appointments ordered most recent first, truncated to
/// `page_size * pages` entries.
pub fn history(appointments: &[Appointment], page_size: usize, pages: usize) -> Vec<Appointment> {
    let mut sorted: Vec<Appointment> = appointments.to_vec();
    sorted.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    sorted.truncate(page_size.saturating_mul(pages));
    sorted
}

/// The "next N" widget: future appointments restricted to the given
/// status set, soonest first, truncated to `limit`.
///
/// The admin and patient dashboards pass different status sets
/// (`ADMIN_WIDGET_STATUSES` / `PATIENT_WIDGET_STATUSES`).
pub fn next_appointments(
    appointments: &[Appointment],
    today: WireDate,
    statuses: &[AppointmentStatus],
    limit: usize,
) -> Vec<Appointment> {
    let mut kept: Vec<Appointment> = appointments
        .iter()
        .filter(|a| statuses.contains(&a.status) && a.date >= today)
        .cloned()
        .collect();
    kept.sort_by_key(Appointment::sort_key);
    kept.truncate(limit);
    kept
}

/// Relative display classification for an appointment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Tomorrow,
    /// Any other day: weekday plus zero-padded day and month for a
    /// short "Mon, 25/11"-style label.
    Other { weekday: Weekday, day: u32, month: u32 },
}

pub fn day_label(date: WireDate, today: WireDate) -> DayLabel {
    if date == today {
        DayLabel::Today
    } else if date == today.next_day() {
        DayLabel::Tomorrow
    } else {
        let (day, month) = date.day_month();
        DayLabel::Other {
            weekday: date.weekday(),
            day,
            month,
        }
    }
}
