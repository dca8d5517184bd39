//! Slot availability.
//!
//! Appointments are booked against small fixed lists of literal times.
//! Two lists exist and are deliberately not unified: the booking form
//! offers one set, the reschedule form another. Each call site keeps its
//! own constant.
//!
//! Known limitation: availability is computed from the caller's fetched
//! snapshot. Two clients booking the same slot concurrently are not
//! detected here; the remote source is the arbiter.

use crate::models::{Appointment, AppointmentStatus};

use super::wire::{WireDate, WireTime};

/// Slot times offered when requesting a new appointment.
pub const BOOKING_SLOTS: [WireTime; 5] = [
    WireTime::from_hm(9, 0),
    WireTime::from_hm(11, 0),
    WireTime::from_hm(13, 0),
    WireTime::from_hm(15, 0),
    WireTime::from_hm(17, 0),
];

/// Slot times offered when rescheduling an existing appointment.
pub const RESCHEDULE_SLOTS: [WireTime; 4] = [
    WireTime::from_hm(10, 0),
    WireTime::from_hm(14, 0),
    WireTime::from_hm(17, 0),
    WireTime::from_hm(19, 0),
];

/// One fixed slot with its availability flag for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SlotStatus {
    pub time: WireTime,
    pub available: bool,
}

/// Compute slot availability for one day.
///
/// `None` for the date means no day has been chosen yet and yields an
/// empty list, not an error. A slot is taken when some appointment on
/// that date has exactly its time and is not cancelled — cancelling an
/// appointment frees its slot. Output preserves the slot list's order.
pub fn available_slots(
    slots: &[WireTime],
    date: Option<WireDate>,
    appointments: &[Appointment],
) -> Vec<SlotStatus> {
    let Some(date) = date else {
        return Vec::new();
    };

    let booked: Vec<WireTime> = appointments
        .iter()
        .filter(|a| a.date == date && a.status != AppointmentStatus::Cancelled)
        .map(|a| a.time)
        .collect();

    slots
        .iter()
        .map(|&time| SlotStatus {
            time,
            available: !booked.contains(&time),
        })
        .collect()
}

/// Earliest date the booking form accepts: tomorrow. Same-day requests
/// are not offered.
pub fn earliest_booking_date(today: WireDate) -> WireDate {
    today.next_day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentKind;

    fn appointment(id: i64, date: &str, time: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            date: date.parse().unwrap(),
            time: time.parse().unwrap(),
            kind: AppointmentKind::Online,
            status,
            patient_name: "Lucía".into(),
            patient_last_name: "Serrano".into(),
            patient_email: "lucia@example.com".into(),
        }
    }

    #[test]
    fn no_date_yields_empty_list() {
        let booked = [appointment(1, "20-01-2025", "09:00", AppointmentStatus::Pending)];
        assert!(available_slots(&BOOKING_SLOTS, None, &booked).is_empty());
    }

    #[test]
    fn empty_day_has_every_slot_available() {
        let date = "20-01-2025".parse().unwrap();
        let slots = available_slots(&BOOKING_SLOTS, Some(date), &[]);
        assert_eq!(slots.len(), BOOKING_SLOTS.len());
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn booked_slot_is_unavailable_and_cancelled_frees_it() {
        let date = "20-01-2025".parse().unwrap();
        let booked = [
            appointment(1, "20-01-2025", "11:00", AppointmentStatus::Confirmed),
            appointment(2, "20-01-2025", "15:00", AppointmentStatus::Cancelled),
        ];
        let slots = available_slots(&BOOKING_SLOTS, Some(date), &booked);

        let by_time = |t: &str| {
            let time: WireTime = t.parse().unwrap();
            slots.iter().find(|s| s.time == time).unwrap().available
        };
        assert!(!by_time("11:00"), "confirmed booking occupies its slot");
        assert!(by_time("15:00"), "cancelled booking frees its slot");
        assert!(by_time("09:00"));
        assert!(by_time("13:00"));
        assert!(by_time("17:00"));
    }

    #[test]
    fn other_days_do_not_occupy_slots() {
        let date = "20-01-2025".parse().unwrap();
        let booked = [appointment(1, "21-01-2025", "11:00", AppointmentStatus::Confirmed)];
        let slots = available_slots(&BOOKING_SLOTS, Some(date), &booked);
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn output_preserves_slot_list_order() {
        let date = "20-01-2025".parse().unwrap();
        let slots = available_slots(&RESCHEDULE_SLOTS, Some(date), &[]);
        let times: Vec<String> = slots.iter().map(|s| s.time.to_string()).collect();
        assert_eq!(times, ["10:00", "14:00", "17:00", "19:00"]);
    }

    #[test]
    fn slot_lists_stay_distinct_per_call_site() {
        // Two screens, two literal lists. 17:00 is the only overlap.
        let booking: Vec<String> = BOOKING_SLOTS.iter().map(|t| t.to_string()).collect();
        let reschedule: Vec<String> = RESCHEDULE_SLOTS.iter().map(|t| t.to_string()).collect();
        assert_eq!(booking, ["09:00", "11:00", "13:00", "15:00", "17:00"]);
        assert_eq!(reschedule, ["10:00", "14:00", "17:00", "19:00"]);
    }

    #[test]
    fn pending_bookings_also_occupy() {
        let date = "20-01-2025".parse().unwrap();
        let booked = [appointment(1, "20-01-2025", "09:00", AppointmentStatus::Pending)];
        let slots = available_slots(&BOOKING_SLOTS, Some(date), &booked);
        assert!(!slots[0].available);
    }

    #[test]
    fn earliest_booking_is_tomorrow() {
        let today: WireDate = "31-12-2024".parse().unwrap();
        assert_eq!(earliest_booking_date(today).to_string(), "01-01-2025");
    }
}
