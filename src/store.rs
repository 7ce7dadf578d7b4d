//! Appointment store: the single owner of appointment state.
//!
//! All mutation goes through one write lock, so the availability check in
//! `create` commits atomically with the insert. Reads take the read lock
//! and observe a consistent snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};

use crate::booking::TokenSource;
use crate::error::{BookingError, Result};
use crate::models::{Appointment, AppointmentStatus, PatientIntake, Slot};

/// Attempts at drawing a fresh token before giving up.
pub const MAX_TOKEN_ATTEMPTS: u32 = 50;

#[derive(Debug, Default)]
struct StoreState {
    appointments: HashMap<String, Appointment>,
    /// Slot occupancy by non-cancelled appointments: (doctor, start) -> id.
    occupied: HashMap<(String, NaiveDateTime), String>,
}

#[derive(Debug, Default)]
pub struct AppointmentStore {
    state: RwLock<StoreState>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commit a validated intake against a slot as a new pending appointment.
    ///
    /// Occupancy is re-checked under the write lock, so two concurrent
    /// bookings of the same slot cannot both succeed.
    pub fn create(
        &self,
        slot: &Slot,
        intake: &PatientIntake,
        tokens: &dyn TokenSource,
    ) -> Result<Appointment> {
        let mut state = self.write();

        let key = (slot.doctor_id.clone(), slot.start());
        if state.occupied.contains_key(&key) {
            return Err(BookingError::SlotTaken);
        }

        let token = draw_unique_token(&state, &slot.doctor_id, slot.date, tokens)?;
        let appointment = Appointment::new(slot, intake, token);
        state.occupied.insert(key, appointment.id.clone());
        state
            .appointments
            .insert(appointment.id.clone(), appointment.clone());

        info!(
            "created appointment {} for doctor {} at {} (token {})",
            appointment.id, appointment.doctor_id, appointment.start, appointment.token
        );
        Ok(appointment)
    }

    /// Mark a pending appointment as confirmed. Idempotent when already
    /// confirmed; a cancelled appointment cannot come back.
    pub fn confirm(&self, id: &str) -> Result<Appointment> {
        let mut state = self.write();
        let appointment = state
            .appointments
            .get_mut(id)
            .ok_or_else(|| BookingError::NotFound(format!("appointment {id}")))?;

        match appointment.status {
            AppointmentStatus::Cancelled => Err(BookingError::InvalidTransition(format!(
                "appointment {id} is cancelled"
            ))),
            AppointmentStatus::Confirmed => Ok(appointment.clone()),
            AppointmentStatus::Pending => {
                appointment.status = AppointmentStatus::Confirmed;
                debug!("appointment {id} confirmed");
                Ok(appointment.clone())
            }
        }
    }

    /// Cancel an appointment, recording the reason and freeing its slot.
    ///
    /// Re-cancelling is idempotent; a different reason overwrites the old
    /// one (last write wins).
    pub fn cancel(&self, id: &str, reason: &str) -> Result<Appointment> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(BookingError::InvalidArgument(
                "cancel reason cannot be empty".to_string(),
            ));
        }

        let mut state = self.write();
        let (key, cancelled, was_active) = {
            let appointment = state
                .appointments
                .get_mut(id)
                .ok_or_else(|| BookingError::NotFound(format!("appointment {id}")))?;
            let was_active = appointment.is_active();
            appointment.status = AppointmentStatus::Cancelled;
            appointment.cancel_reason = Some(reason.to_string());
            (
                (appointment.doctor_id.clone(), appointment.start),
                appointment.clone(),
                was_active,
            )
        };
        if was_active {
            state.occupied.remove(&key);
            info!("appointment {id} cancelled: {reason}");
        }
        Ok(cancelled)
    }

    pub fn get(&self, id: &str) -> Option<Appointment> {
        self.read().appointments.get(id).cloned()
    }

    /// All appointments sorted by start time.
    pub fn appointments(&self) -> Vec<Appointment> {
        let mut appointments: Vec<Appointment> =
            self.read().appointments.values().cloned().collect();
        appointments.sort_by_key(|a| a.start);
        appointments
    }

    /// A doctor's appointments, soonest first.
    pub fn list_by_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .read()
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.start);
        appointments
    }

    /// Case-insensitive substring match over patient names (the dashboard
    /// search box). Unordered.
    pub fn list_by_patient_name(&self, needle: &str) -> Vec<Appointment> {
        let needle = needle.to_lowercase();
        self.read()
            .appointments
            .values()
            .filter(|a| a.patient_name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Start instants occupied by non-cancelled appointments for a doctor.
    pub fn occupied_starts(&self, doctor_id: &str) -> HashSet<NaiveDateTime> {
        self.read()
            .occupied
            .keys()
            .filter(|(doctor, _)| doctor == doctor_id)
            .map(|(_, start)| *start)
            .collect()
    }

    /// Export the full state as the id-keyed JSON map the backing file keeps.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.read().appointments)
    }

    /// Rebuild a store from a snapshot produced by [`Self::snapshot_json`].
    pub fn from_snapshot_json(json: &str) -> serde_json::Result<Self> {
        let appointments: HashMap<String, Appointment> = serde_json::from_str(json)?;
        let occupied = appointments
            .values()
            .filter(|a| a.is_active())
            .map(|a| ((a.doctor_id.clone(), a.start), a.id.clone()))
            .collect();
        Ok(Self {
            state: RwLock::new(StoreState {
                appointments,
                occupied,
            }),
        })
    }
}

/// Draw tokens until one is unique among the doctor's appointments that day.
fn draw_unique_token(
    state: &StoreState,
    doctor_id: &str,
    date: NaiveDate,
    tokens: &dyn TokenSource,
) -> Result<String> {
    let taken: HashSet<&str> = state
        .appointments
        .values()
        .filter(|a| a.doctor_id == doctor_id && a.start.date() == date)
        .map(|a| a.token.as_str())
        .collect();

    for _ in 0..MAX_TOKEN_ATTEMPTS {
        let candidate = tokens.draw().to_string();
        if !taken.contains(candidate.as_str()) {
            return Ok(candidate);
        }
    }
    warn!("token space exhausted for doctor {doctor_id} on {date}");
    Err(BookingError::TokenExhausted)
}
