//! Read-only appointment views for patient and doctor screens.
//!
//! The facade never mutates the store; presentation layers hold no copy of
//! appointment state beyond what these views return.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::models::Appointment;
use crate::store::AppointmentStore;

pub struct QueryFacade {
    store: Arc<AppointmentStore>,
}

impl QueryFacade {
    pub fn new(store: Arc<AppointmentStore>) -> Self {
        QueryFacade { store }
    }

    /// Non-cancelled appointments for a doctor from `now` on, soonest first.
    pub fn upcoming_for(&self, doctor_id: &str, now: NaiveDateTime) -> Vec<Appointment> {
        self.store
            .list_by_doctor(doctor_id)
            .into_iter()
            .filter(|a| a.is_active() && a.start >= now)
            .collect()
    }

    /// The doctor's next appointment, if any.
    pub fn next_for(&self, doctor_id: &str, now: NaiveDateTime) -> Option<Appointment> {
        self.upcoming_for(doctor_id, now).into_iter().next()
    }

    /// Every appointment booked under a mobile number, latest first.
    /// Includes cancelled ones.
    pub fn history_for(&self, mobile: &str) -> Vec<Appointment> {
        let mut history: Vec<Appointment> = self
            .store
            .appointments()
            .into_iter()
            .filter(|a| a.mobile == mobile)
            .collect();
        history.sort_by(|a, b| b.start.cmp(&a.start));
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::RandomTokens;
    use crate::models::{Gender, PatientIntake, Period, Slot};
    use chrono::{NaiveDate, NaiveTime};

    fn intake(name: &str, mobile: &str) -> PatientIntake {
        PatientIntake {
            name: name.to_string(),
            age: 30,
            gender: Gender::Female,
            problem: "Checkup".to_string(),
            relation: "Self".to_string(),
            mobile: mobile.to_string(),
        }
    }

    fn slot(doctor_id: &str, day: u32, hour: u32, minute: u32) -> Slot {
        let start_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        Slot {
            doctor_id: doctor_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            start_time,
            end_time: start_time + chrono::Duration::minutes(15),
            period: if hour < 14 {
                Period::Morning
            } else {
                Period::Evening
            },
        }
    }

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn upcoming_skips_past_and_cancelled() {
        let store = Arc::new(AppointmentStore::new());
        let query = QueryFacade::new(store.clone());

        store
            .create(&slot("D1", 9, 9, 30), &intake("Past", "9876543210"), &RandomTokens)
            .unwrap();
        let cancelled = store
            .create(
                &slot("D1", 11, 9, 30),
                &intake("Gone", "9876543210"),
                &RandomTokens,
            )
            .unwrap();
        store.cancel(&cancelled.id, "Travelling").unwrap();
        store
            .create(
                &slot("D1", 12, 10, 0),
                &intake("Later", "9876543210"),
                &RandomTokens,
            )
            .unwrap();
        store
            .create(
                &slot("D1", 11, 15, 30),
                &intake("Sooner", "9876543210"),
                &RandomTokens,
            )
            .unwrap();

        let upcoming = query.upcoming_for("D1", noon(10));
        let names: Vec<String> = upcoming.into_iter().map(|a| a.patient_name).collect();
        assert_eq!(names, vec!["Sooner", "Later"]);
        assert_eq!(
            query.next_for("D1", noon(10)).unwrap().patient_name,
            "Sooner"
        );
    }

    #[test]
    fn next_is_none_when_nothing_upcoming() {
        let store = Arc::new(AppointmentStore::new());
        let query = QueryFacade::new(store.clone());
        store
            .create(&slot("D1", 9, 9, 30), &intake("Past", "9876543210"), &RandomTokens)
            .unwrap();
        assert!(query.next_for("D1", noon(10)).is_none());
    }

    #[test]
    fn history_is_descending_and_keeps_cancelled() {
        let store = Arc::new(AppointmentStore::new());
        let query = QueryFacade::new(store.clone());

        store
            .create(&slot("D1", 9, 9, 30), &intake("Old", "9876543210"), &RandomTokens)
            .unwrap();
        let cancelled = store
            .create(&slot("D2", 11, 9, 30), &intake("Mid", "9876543210"), &RandomTokens)
            .unwrap();
        store.cancel(&cancelled.id, "Clash").unwrap();
        store
            .create(&slot("D1", 12, 9, 30), &intake("New", "9876543210"), &RandomTokens)
            .unwrap();
        store
            .create(
                &slot("D1", 12, 10, 0),
                &intake("Other", "9999999999"),
                &RandomTokens,
            )
            .unwrap();

        let names: Vec<String> = query
            .history_for("9876543210")
            .into_iter()
            .map(|a| a.patient_name)
            .collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);
    }
}
