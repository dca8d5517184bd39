pub mod listing;
pub mod slots;
pub mod wire;

pub use listing::{
    day_label, history, next_appointments, upcoming, DayLabel, ADMIN_WIDGET_STATUSES,
    HISTORY_PAGE_SIZE, PATIENT_WIDGET_STATUSES,
};
pub use slots::{
    available_slots, earliest_booking_date, SlotStatus, BOOKING_SLOTS, RESCHEDULE_SLOTS,
};
pub use wire::{WireDate, WireFormatError, WireTime};
