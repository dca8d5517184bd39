use crate::schedule::wire::WireDate;

use super::appointment::Appointment;
use super::enums::{AppointmentKind, AppointmentStatus};

/// Status axis of the appointment filter: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

/// Kind axis of the appointment filter: everything, or one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(AppointmentKind),
}

/// The active filter over the appointment collection.
///
/// The default criteria (all / all / no date) match every appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub kind: KindFilter,
    pub date: Option<WireDate>,
}

impl FilterCriteria {
    /// The single membership predicate shared by the collection store's
    /// filtered view and the per-patient sub-filters.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => appointment.status == status,
        };
        let kind_ok = match self.kind {
            KindFilter::All => true,
            KindFilter::Only(kind) => appointment.kind == kind,
        };
        let date_ok = match self.date {
            None => true,
            Some(date) => appointment.date == date,
        };
        status_ok && kind_ok && date_ok
    }

    /// Merge a partial update; axes the patch leaves unset keep their
    /// previous values.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// A partial filter update. Each axis is `None` to leave the previous
/// value in place; `date` is doubly optional so a patch can also clear
/// the date axis (`Some(None)`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterPatch {
    pub status: Option<StatusFilter>,
    pub kind: Option<KindFilter>,
    pub date: Option<Option<WireDate>>,
}

impl FilterPatch {
    pub fn status(status: StatusFilter) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn kind(kind: KindFilter) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn date(date: Option<WireDate>) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }
}
