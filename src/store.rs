//! In-memory appointment collection.
//!
//! `AppointmentBook` is the only writer of appointment state for a
//! session. It holds the full collection, a filtered view derived from
//! the active criteria, the current selection, and the loading/error
//! flags the screens render from. Remote calls live elsewhere; every
//! operation here is synchronous over already-fetched data.
//!
//! The filtered view is kept in sync manually, not recomputed on every
//! mutation. `add` reproduces the historical membership-tested append:
//! a new appointment joins the filtered view only when that view is
//! non-empty and the item matches the active criteria. An empty view
//! therefore cannot distinguish "no filter applied" from "filter matched
//! nothing"; callers that need certainty re-apply the filter.

use thiserror::Error;

use crate::models::{
    Appointment, AppointmentChanges, AppointmentStatus, FilterCriteria, FilterPatch,
};

/// Errors from collection mutations that violate a business invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Appointment {id} is {status} and can no longer be rescheduled")]
    EditLocked { id: i64, status: AppointmentStatus },
}

/// The appointment collection for the logged-in session's current scope:
/// everything for an admin, the patient's own appointments otherwise.
#[derive(Debug, Default)]
pub struct AppointmentBook {
    all: Vec<Appointment>,
    filtered: Vec<Appointment>,
    criteria: FilterCriteria,
    selected: Option<Appointment>,
    loading: bool,
    error: Option<String>,
    /// Bumped on every wholesale load or reset. Async callers snapshot
    /// it before awaiting and discard results when it moved.
    generation: u64,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Read access ───────────────────────────────────────

    pub fn all(&self) -> &[Appointment] {
        &self.all
    }

    pub fn filtered(&self) -> &[Appointment] {
        &self.filtered
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria
    }

    pub fn selected(&self) -> Option<&Appointment> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn find(&self, id: i64) -> Option<&Appointment> {
        self.all.iter().find(|a| a.id == id)
    }

    // ── Wholesale load ────────────────────────────────────

    /// Replace the full collection after a fetch. Clears any previous
    /// error and the loading flag; the active criteria and the filtered
    /// view are left untouched.
    pub fn replace_all(&mut self, items: Vec<Appointment>) {
        self.all = items;
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }

    /// Drop everything; the owning view unmounted. Later results from
    /// requests started before the reset are stale.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    // ── Incremental mutations ─────────────────────────────

    /// Append a newly created appointment.
    ///
    /// The append to `all` is unconditional. The filtered view only
    /// receives the item when it is currently non-empty and the item
    /// matches the active criteria (see module docs).
    pub fn add(&mut self, item: Appointment) {
        if !self.filtered.is_empty() && self.criteria.matches(&item) {
            self.filtered.push(item.clone());
        }
        self.all.push(item);
    }

    /// Set the status of the appointment with `id`. Returns whether the
    /// id was present in the full collection.
    ///
    /// The full and filtered entries are two independent records, not
    /// aliases; both lookups happen.
    pub fn update_status(&mut self, id: i64, status: AppointmentStatus) -> bool {
        let Some(appointment) = self.all.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        appointment.status = status;
        if let Some(filtered) = self.filtered.iter_mut().find(|a| a.id == id) {
            filtered.status = status;
        }
        if let Some(selected) = self.selected.as_mut().filter(|a| a.id == id) {
            selected.status = status;
        }
        true
    }

    /// Patch the schedulable fields of the appointment with `id`, with
    /// the same dual-update pattern as `update_status`.
    ///
    /// Cancelled and paid appointments are frozen; editing them is
    /// rejected here so no caller can bypass the rule through a
    /// different code path. Returns whether the id was present.
    pub fn update_fields(
        &mut self,
        id: i64,
        changes: &AppointmentChanges,
    ) -> Result<bool, StoreError> {
        let Some(appointment) = self.all.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        if !appointment.status.is_editable() {
            return Err(StoreError::EditLocked {
                id,
                status: appointment.status,
            });
        }
        changes.apply_to(appointment);
        if let Some(filtered) = self.filtered.iter_mut().find(|a| a.id == id) {
            changes.apply_to(filtered);
        }
        if let Some(selected) = self.selected.as_mut().filter(|a| a.id == id) {
            changes.apply_to(selected);
        }
        Ok(true)
    }

    /// Delete the appointment with `id` from both views, clearing the
    /// selection when it pointed at the removed entry.
    pub fn remove(&mut self, id: i64) {
        self.all.retain(|a| a.id != id);
        self.filtered.retain(|a| a.id != id);
        if self.selected.as_ref().is_some_and(|a| a.id == id) {
            self.selected = None;
        }
    }

    // ── Filtering ─────────────────────────────────────────

    /// Merge a filter patch into the active criteria and recompute the
    /// filtered view from the full collection.
    pub fn apply_filter(&mut self, patch: FilterPatch) {
        self.criteria.merge(patch);
        self.filtered = self
            .all
            .iter()
            .filter(|a| self.criteria.matches(a))
            .cloned()
            .collect();
    }

    // ── Selection ─────────────────────────────────────────

    pub fn select(&mut self, appointment: Appointment) {
        self.selected = Some(appointment);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ── Load state flags ──────────────────────────────────

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
