//! Booking orchestration.
//!
//! Validates patient intake, checks the doctor directory, commits the slot
//! through the store, and fires the reminder notification. The store is the
//! only component that mutates state; this service just sequences the steps.

use std::sync::Arc;

use log::warn;
use rand::Rng;

use crate::directory::DoctorDirectory;
use crate::error::{BookingError, Result};
use crate::models::{Appointment, PatientIntake, Slot};
use crate::notify::NotificationPort;
use crate::store::AppointmentStore;

/// Source of candidate queue tokens.
pub trait TokenSource: Send + Sync {
    /// Draw one candidate token in [1000, 9999].
    fn draw(&self) -> u16;
}

/// Uniform random tokens over the 4-digit range.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn draw(&self) -> u16 {
        rand::thread_rng().gen_range(1000..=9999)
    }
}

pub struct BookingService {
    store: Arc<AppointmentStore>,
    directory: Arc<dyn DoctorDirectory>,
    notifier: Arc<dyn NotificationPort>,
    tokens: Box<dyn TokenSource>,
}

impl BookingService {
    pub fn new(
        store: Arc<AppointmentStore>,
        directory: Arc<dyn DoctorDirectory>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self::with_tokens(store, directory, notifier, Box::new(RandomTokens))
    }

    /// Like [`Self::new`] but with an explicit token source, for tests.
    pub fn with_tokens(
        store: Arc<AppointmentStore>,
        directory: Arc<dyn DoctorDirectory>,
        notifier: Arc<dyn NotificationPort>,
        tokens: Box<dyn TokenSource>,
    ) -> Self {
        BookingService {
            store,
            directory,
            notifier,
            tokens,
        }
    }

    /// Book a slot for a patient: validate the intake, then commit it as a
    /// pending appointment with a queue token.
    ///
    /// The slot must belong to `doctor_id`; an unknown doctor is rejected
    /// before the store is touched. `SlotTaken` surfaces unchanged.
    pub fn book(&self, doctor_id: &str, intake: &PatientIntake, slot: &Slot) -> Result<Appointment> {
        intake.validate()?;
        if slot.doctor_id != doctor_id {
            return Err(BookingError::InvalidArgument(format!(
                "slot belongs to doctor {}, not {doctor_id}",
                slot.doctor_id
            )));
        }
        if !self.directory.doctor_exists(doctor_id) {
            return Err(BookingError::NotFound(format!("doctor {doctor_id}")));
        }

        let appointment = self.store.create(slot, intake, self.tokens.as_ref())?;

        // Reminder dispatch is fire-and-forget.
        if let Err(e) = self.notifier.notify_upcoming(&appointment) {
            warn!(
                "reminder dispatch failed for appointment {}: {e}",
                appointment.id
            );
        }

        Ok(appointment)
    }
}
