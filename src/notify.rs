//! Reminder dispatch seam.
//!
//! The booking path fires and forgets: a failed notification is logged by
//! the caller and never surfaces to the patient.

use log::info;

use crate::models::Appointment;

/// Outbound reminder channel.
pub trait NotificationPort: Send + Sync {
    /// Announce an upcoming appointment to the patient.
    fn notify_upcoming(&self, appointment: &Appointment) -> std::result::Result<(), String>;
}

/// Log-only notifier used by the CLI and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationPort for LogNotifier {
    fn notify_upcoming(&self, appointment: &Appointment) -> std::result::Result<(), String> {
        info!(
            "reminder: {} has an appointment at {} (token {})",
            appointment.patient_name, appointment.start, appointment.token
        );
        Ok(())
    }
}
