//! Appointment booking core for a patient/doctor clinic app.
//!
//! The crate models the scheduling behavior behind a booking front end:
//! slot-calendar generation over a fixed daily template, an appointment
//! store owning the pending/confirmed/cancelled lifecycle, a booking
//! service that folds validated patient intake into committed appointments
//! with queue tokens, and read-only query views for the patient and doctor
//! screens. Doctors and reminder dispatch live behind traits; the crate
//! ships in-memory and log-only implementations.

pub mod booking;
pub mod calendar;
pub mod clock;
pub mod directory;
pub mod error;
pub mod models;
pub mod notify;
pub mod query;
pub mod store;

pub use booking::{BookingService, RandomTokens, TokenSource};
pub use calendar::SlotCalendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{DoctorDirectory, InMemoryDirectory};
pub use error::{BookingError, Result};
pub use models::{
    Appointment, AppointmentStatus, Doctor, Gender, PatientIntake, Period, Slot,
};
pub use notify::{LogNotifier, NotificationPort};
pub use query::QueryFacade;
pub use store::AppointmentStore;
