//! Data models for the appointment booking core.
//!
//! This module defines the core data structures used throughout the system:
//! - Doctor: directory record, referenced by id
//! - Slot: a bookable time window derived from the daily template
//! - PatientIntake: patient-supplied form data, validated before booking
//! - Appointment: a committed booking with queue token and status

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, Result};

/// Gender choices offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Convert a string to a Gender enum value.
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(BookingError::Validation { field: "gender" }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Appointment lifecycle states.
///
/// Pending appointments may be confirmed by the doctor or cancelled by
/// either side; confirmed appointments may still be cancelled; cancelled
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn name(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

/// Which band of the day a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Evening,
}

/// A doctor record from the directory.
///
/// The booking core never mutates doctors; it only references them by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub available_today: bool,
    pub timing: String,
    pub description: String,
}

impl Doctor {
    /// Create a new doctor record with validation.
    pub fn new(
        id: String,
        name: String,
        specialty: String,
        available_today: bool,
        timing: String,
        description: String,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(BookingError::InvalidArgument(
                "doctor id cannot be empty".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(BookingError::InvalidArgument(
                "doctor name cannot be empty".to_string(),
            ));
        }

        Ok(Doctor {
            id,
            name,
            specialty,
            available_today,
            timing,
            description,
        })
    }
}

/// A bookable time window for one doctor on one calendar day.
///
/// Slots are ephemeral: they are derived from the daily template on every
/// query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub period: Period,
}

impl Slot {
    /// The full start instant of the slot (date + start time).
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

/// Patient-supplied data collected before a booking is committed.
///
/// Transient: validated here, then folded into an Appointment. Validation
/// failure never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIntake {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub problem: String,
    pub relation: String,
    pub mobile: String,
}

impl PatientIntake {
    /// Check every intake constraint, reporting the first failing field.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.name.chars().count() > 50 {
            return Err(BookingError::Validation { field: "name" });
        }
        if self.age > 120 {
            return Err(BookingError::Validation { field: "age" });
        }
        if self.problem.chars().count() > 200 {
            return Err(BookingError::Validation { field: "problem" });
        }
        if self.relation.chars().count() > 30 {
            return Err(BookingError::Validation { field: "relation" });
        }
        if self.mobile.len() != 10 || !self.mobile.chars().all(|c| c.is_ascii_digit()) {
            return Err(BookingError::Validation { field: "mobile" });
        }
        Ok(())
    }
}

/// A committed booking.
///
/// Serializes to the same shape the backing JSON store keeps: one record
/// per appointment, keyed by id, with the slot start under `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub mobile: String,
    pub problem: String,
    pub relation: String,
    #[serde(rename = "date")]
    pub start: NaiveDateTime,
    pub token: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl Appointment {
    /// Build a fresh pending appointment from a validated intake and slot.
    pub(crate) fn new(slot: &Slot, intake: &PatientIntake, token: String) -> Self {
        Appointment {
            id: Uuid::new_v4().to_string(),
            doctor_id: slot.doctor_id.clone(),
            patient_name: intake.name.clone(),
            age: intake.age,
            gender: intake.gender,
            mobile: intake.mobile.clone(),
            problem: intake.problem.clone(),
            relation: intake.relation.clone(),
            start: slot.start(),
            token,
            status: AppointmentStatus::Pending,
            cancel_reason: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }

    /// Whether this appointment still occupies its slot.
    pub fn is_active(&self) -> bool {
        !self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> PatientIntake {
        PatientIntake {
            name: "Asha".to_string(),
            age: 30,
            gender: Gender::Female,
            problem: "Fever since two days".to_string(),
            relation: "Self".to_string(),
            mobile: "9876543210".to_string(),
        }
    }

    fn slot() -> Slot {
        Slot {
            doctor_id: "D1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
            period: Period::Morning,
        }
    }

    #[test]
    fn valid_intake_passes() {
        assert!(intake().validate().is_ok());
    }

    #[test]
    fn empty_name_fails() {
        let mut bad = intake();
        bad.name = "   ".to_string();
        assert_eq!(
            bad.validate(),
            Err(BookingError::Validation { field: "name" })
        );
    }

    #[test]
    fn overlong_name_fails() {
        let mut bad = intake();
        bad.name = "x".repeat(51);
        assert_eq!(
            bad.validate(),
            Err(BookingError::Validation { field: "name" })
        );
    }

    #[test]
    fn age_over_limit_fails() {
        let mut bad = intake();
        bad.age = 121;
        assert_eq!(bad.validate(), Err(BookingError::Validation { field: "age" }));
    }

    #[test]
    fn short_mobile_fails() {
        let mut bad = intake();
        bad.mobile = "12345".to_string();
        assert_eq!(
            bad.validate(),
            Err(BookingError::Validation { field: "mobile" })
        );
    }

    #[test]
    fn non_numeric_mobile_fails() {
        let mut bad = intake();
        bad.mobile = "98765abc10".to_string();
        assert_eq!(
            bad.validate(),
            Err(BookingError::Validation { field: "mobile" })
        );
    }

    #[test]
    fn overlong_problem_fails() {
        let mut bad = intake();
        bad.problem = "p".repeat(201);
        assert_eq!(
            bad.validate(),
            Err(BookingError::Validation { field: "problem" })
        );
    }

    #[test]
    fn first_failing_field_wins() {
        let mut bad = intake();
        bad.name = String::new();
        bad.mobile = "123".to_string();
        assert_eq!(
            bad.validate(),
            Err(BookingError::Validation { field: "name" })
        );
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(Gender::from_string("female").unwrap(), Gender::Female);
        assert_eq!(Gender::from_string(" MALE ").unwrap(), Gender::Male);
        assert!(Gender::from_string("unknown").is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&AppointmentStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: AppointmentStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, AppointmentStatus::Cancelled);
    }

    #[test]
    fn appointment_record_shape_matches_backing_store() {
        let appt = Appointment::new(&slot(), &intake(), "1234".to_string());
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["doctorId"], "D1");
        assert_eq!(json["patientName"], "Asha");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["token"], "1234");
        assert!(json.get("cancelReason").is_none());
        assert_eq!(json["date"], "2024-01-10T09:30:00");
    }
}
