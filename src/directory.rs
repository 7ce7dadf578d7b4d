//! Doctor directory lookup.
//!
//! Doctor records are owned outside the booking core; the core only asks
//! whether a doctor exists and whether they are taking patients today.

use std::collections::HashMap;

use crate::models::Doctor;

pub trait DoctorDirectory: Send + Sync {
    fn doctor_exists(&self, doctor_id: &str) -> bool;
    fn is_available_today(&self, doctor_id: &str) -> bool;
}

/// In-memory directory backing the CLI and tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    doctors: HashMap<String, Doctor>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doctor: Doctor) {
        self.doctors.insert(doctor.id.clone(), doctor);
    }

    pub fn get(&self, doctor_id: &str) -> Option<Doctor> {
        self.doctors.get(doctor_id).cloned()
    }

    /// All doctors sorted by name, for listing screens.
    pub fn doctors(&self) -> Vec<Doctor> {
        let mut doctors: Vec<Doctor> = self.doctors.values().cloned().collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        doctors
    }
}

impl DoctorDirectory for InMemoryDirectory {
    fn doctor_exists(&self, doctor_id: &str) -> bool {
        self.doctors.contains_key(doctor_id)
    }

    fn is_available_today(&self, doctor_id: &str) -> bool {
        self.doctors
            .get(doctor_id)
            .map(|d| d.available_today)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: &str, name: &str, available: bool) -> Doctor {
        Doctor::new(
            id.to_string(),
            name.to_string(),
            "Cardiologist".to_string(),
            available,
            "09:30 AM - 06:15 PM".to_string(),
            "Senior consultant".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn lookup_reflects_inserted_records() {
        let mut directory = InMemoryDirectory::new();
        directory.insert(doctor("D1", "Dr. Mehta", true));
        directory.insert(doctor("D2", "Dr. Dere", false));

        assert!(directory.doctor_exists("D1"));
        assert!(!directory.doctor_exists("D9"));
        assert!(directory.is_available_today("D1"));
        assert!(!directory.is_available_today("D2"));
        assert!(!directory.is_available_today("D9"));
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let mut directory = InMemoryDirectory::new();
        directory.insert(doctor("D2", "Dr. Nair", true));
        directory.insert(doctor("D1", "Dr. Dere", true));

        let names: Vec<String> = directory.doctors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Dr. Dere", "Dr. Nair"]);
    }

    #[test]
    fn empty_doctor_id_is_rejected() {
        assert!(Doctor::new(
            "".to_string(),
            "Dr. X".to_string(),
            "GP".to_string(),
            true,
            String::new(),
            String::new(),
        )
        .is_err());
    }
}
