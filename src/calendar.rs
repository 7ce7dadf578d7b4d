//! Slot calendar for the booking flow.
//!
//! Slots are never persisted. Each query re-derives the fixed daily
//! template for the requested window and drops anything a non-cancelled
//! appointment already occupies.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::{BookingError, Result};
use crate::models::{Period, Slot};
use crate::store::AppointmentStore;

/// Minutes each slot lasts.
const SLOT_MINUTES: i64 = 15;

/// Morning band start times: 09:30 through 13:00, every half hour.
const MORNING_STARTS: [(u32, u32); 8] = [
    (9, 30),
    (10, 0),
    (10, 30),
    (11, 0),
    (11, 30),
    (12, 0),
    (12, 30),
    (13, 0),
];

/// Evening band start times.
const EVENING_STARTS: [(u32, u32); 4] = [(15, 30), (16, 0), (17, 0), (18, 0)];

pub struct SlotCalendar {
    store: Arc<AppointmentStore>,
}

impl SlotCalendar {
    pub fn new(store: Arc<AppointmentStore>) -> Self {
        SlotCalendar { store }
    }

    /// All template slots for one doctor on one calendar day.
    pub fn daily_template(doctor_id: &str, date: NaiveDate) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(MORNING_STARTS.len() + EVENING_STARTS.len());
        for &(hour, minute) in &MORNING_STARTS {
            slots.push(template_slot(doctor_id, date, hour, minute, Period::Morning));
        }
        for &(hour, minute) in &EVENING_STARTS {
            slots.push(template_slot(doctor_id, date, hour, minute, Period::Evening));
        }
        slots
    }

    /// Open slots for a doctor over `num_days` consecutive days starting at
    /// `start_date`.
    ///
    /// Finite and restartable: the iterator is derived from a snapshot of
    /// the store, and calling again re-derives against current bookings.
    pub fn available_slots(
        &self,
        doctor_id: &str,
        start_date: NaiveDate,
        num_days: i64,
    ) -> Result<impl Iterator<Item = Slot>> {
        if num_days <= 0 {
            return Err(BookingError::InvalidRange(format!(
                "num_days must be positive, got {num_days}"
            )));
        }

        let doctor_id = doctor_id.to_string();
        let booked = self.store.occupied_starts(&doctor_id);
        Ok((0..num_days).flat_map(move |offset| {
            let date = start_date + Duration::days(offset);
            Self::daily_template(&doctor_id, date)
                .into_iter()
                .filter(|slot| !booked.contains(&slot.start()))
                .collect::<Vec<_>>()
        }))
    }
}

fn template_slot(doctor_id: &str, date: NaiveDate, hour: u32, minute: u32, period: Period) -> Slot {
    // Template constants are always valid wall-clock times.
    let start_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
    Slot {
        doctor_id: doctor_id.to_string(),
        date,
        start_time,
        end_time: start_time + Duration::minutes(SLOT_MINUTES),
        period,
    }
}
