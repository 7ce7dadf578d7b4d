//! Command-line interface for the clinic booking core.
//!
//! Provides an interactive menu for browsing doctors, checking open slots,
//! booking with patient intake, confirming/cancelling, and a doctor-facing
//! dashboard view.

use std::io::{self, Write};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use medibook::{
    AppointmentStore, BookingService, Clock, Doctor, Gender, InMemoryDirectory, LogNotifier,
    PatientIntake, QueryFacade, Slot, SlotCalendar, SystemClock,
};

struct MedibookCli {
    directory: Arc<InMemoryDirectory>,
    store: Arc<AppointmentStore>,
    calendar: SlotCalendar,
    booking: BookingService,
    query: QueryFacade,
    clock: SystemClock,
    running: bool,
}

impl MedibookCli {
    fn new() -> Self {
        let mut directory = InMemoryDirectory::new();
        for doctor in seed_doctors() {
            directory.insert(doctor);
        }
        let directory = Arc::new(directory);
        let store = Arc::new(AppointmentStore::new());

        MedibookCli {
            calendar: SlotCalendar::new(store.clone()),
            booking: BookingService::new(
                store.clone(),
                directory.clone(),
                Arc::new(LogNotifier),
            ),
            query: QueryFacade::new(store.clone()),
            directory,
            store,
            clock: SystemClock,
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       MEDIBOOK - CLINIC APPOINTMENTS");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. List doctors");
        println!("2. View open slots");
        println!("3. Book appointment");
        println!("4. Confirm appointment");
        println!("5. Cancel appointment");
        println!("6. My appointments");
        println!("7. Doctor dashboard");
        println!("8. Run demo");
        println!("9. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<i32>) -> i32 {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());

            if let Ok(value) = input.parse::<i32>() {
                return value;
            }
            println!("Please enter a valid number");
        }
    }

    fn get_date_input(&self, prompt: &str) -> NaiveDate {
        let tomorrow = (self.clock.now() + Duration::days(1)).date();
        loop {
            let input = self.get_input(prompt, Some(&tomorrow.format("%Y-%m-%d").to_string()));
            match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
                Ok(date) => return date,
                Err(_) => println!("Please enter a date as YYYY-MM-DD"),
            }
        }
    }

    /// Pick a doctor by list index. None when the directory is empty.
    fn select_doctor(&self) -> Option<Doctor> {
        let doctors = self.directory.doctors();
        if doctors.is_empty() {
            println!("\nNo doctors in the directory");
            return None;
        }

        println!();
        for (i, doctor) in doctors.iter().enumerate() {
            println!(
                "  {}. {} ({}) - {}",
                i + 1,
                doctor.name,
                doctor.specialty,
                if doctor.available_today {
                    "Available today"
                } else {
                    "Not available"
                }
            );
        }

        let choice = self.get_int_input("Select doctor", Some(1));
        if choice > 0 && (choice as usize) <= doctors.len() {
            Some(doctors[choice as usize - 1].clone())
        } else {
            println!("Invalid choice");
            None
        }
    }

    fn list_doctors(&self) {
        println!("\n--- Doctors ---");
        for doctor in self.directory.doctors() {
            println!(
                "\n{} - {}\n  {}\n  Timing: {} | {}",
                doctor.name,
                doctor.specialty,
                doctor.description,
                doctor.timing,
                if doctor.available_today {
                    "Available today"
                } else {
                    "Not available today"
                }
            );
        }
    }

    fn view_open_slots(&self) {
        let Some(doctor) = self.select_doctor() else {
            return;
        };

        let start = self.get_date_input("Start date");
        let days = self.get_int_input("Number of days", Some(3));

        match self.calendar.available_slots(&doctor.id, start, days as i64) {
            Ok(slots) => {
                let mut current_date = None;
                let mut total = 0;
                for slot in slots {
                    if Some(slot.date) != current_date {
                        current_date = Some(slot.date);
                        println!("\n{}:", slot.date.format("%A, %Y-%m-%d"));
                    }
                    println!(
                        "  {} - {} ({:?})",
                        slot.start_time.format("%H:%M"),
                        slot.end_time.format("%H:%M"),
                        slot.period
                    );
                    total += 1;
                }
                println!("\n{} open slots for {}", total, doctor.name);
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    /// Pick an open slot for a doctor on a chosen date.
    fn select_slot(&self, doctor: &Doctor) -> Option<Slot> {
        let date = self.get_date_input("Appointment date");
        let slots: Vec<Slot> = match self.calendar.available_slots(&doctor.id, date, 1) {
            Ok(slots) => slots.collect(),
            Err(e) => {
                println!("Error: {}", e);
                return None;
            }
        };

        if slots.is_empty() {
            println!("\nNo open slots on {}", date);
            return None;
        }

        println!();
        for (i, slot) in slots.iter().enumerate() {
            println!(
                "  {}. {} - {}",
                i + 1,
                slot.start_time.format("%H:%M"),
                slot.end_time.format("%H:%M")
            );
        }

        let choice = self.get_int_input("Select slot", Some(1));
        if choice > 0 && (choice as usize) <= slots.len() {
            Some(slots[choice as usize - 1].clone())
        } else {
            println!("Invalid choice");
            None
        }
    }

    fn book_appointment(&self) {
        println!("\n--- Book Appointment ---");

        let Some(doctor) = self.select_doctor() else {
            return;
        };
        let Some(slot) = self.select_slot(&doctor) else {
            return;
        };

        let name = self.get_input("Patient name", None);
        let age = self.get_int_input("Age", Some(30));
        let gender_choice = self.get_input("Gender (male/female/other)", Some("male"));
        let gender = match Gender::from_string(&gender_choice) {
            Ok(g) => g,
            Err(_) => {
                println!("Unknown gender, using Other");
                Gender::Other
            }
        };
        let problem = self.get_input("Describe the problem", Some(""));
        let relation = self.get_input("Relation to patient", Some("Self"));
        let mobile = self.get_input("Mobile number (10 digits)", None);

        let intake = PatientIntake {
            name,
            age: age.clamp(0, u8::MAX as i32) as u8,
            gender,
            problem,
            relation,
            mobile,
        };

        match self.booking.book(&doctor.id, &intake, &slot) {
            Ok(appointment) => {
                println!("\nAppointment booked with {}", doctor.name);
                println!(
                    "  {} | Token: {} | Status: {}",
                    appointment.start.format("%Y-%m-%d %H:%M"),
                    appointment.token,
                    appointment.status.name()
                );
            }
            Err(e) => println!("\nBooking failed: {}", e),
        }
    }

    /// Pick an appointment from the full list. None when there are none.
    fn select_appointment(&self, only_active: bool) -> Option<String> {
        let appointments: Vec<_> = self
            .store
            .appointments()
            .into_iter()
            .filter(|a| !only_active || a.is_active())
            .collect();

        if appointments.is_empty() {
            println!("\nNo appointments found");
            return None;
        }

        println!();
        for (i, appt) in appointments.iter().enumerate() {
            println!(
                "  {}. {} with doctor {} at {} [{}]",
                i + 1,
                appt.patient_name,
                appt.doctor_id,
                appt.start.format("%Y-%m-%d %H:%M"),
                appt.status.name()
            );
        }

        let choice = self.get_int_input("Select appointment (0 to go back)", Some(0));
        if choice > 0 && (choice as usize) <= appointments.len() {
            Some(appointments[choice as usize - 1].id.clone())
        } else {
            None
        }
    }

    fn confirm_appointment(&self) {
        println!("\n--- Confirm Appointment ---");
        let Some(id) = self.select_appointment(true) else {
            return;
        };
        match self.store.confirm(&id) {
            Ok(appointment) => println!(
                "\nConfirmed {} at {}",
                appointment.patient_name,
                appointment.start.format("%Y-%m-%d %H:%M")
            ),
            Err(e) => println!("\nConfirm failed: {}", e),
        }
    }

    fn cancel_appointment(&self) {
        println!("\n--- Cancel Appointment ---");
        let Some(id) = self.select_appointment(true) else {
            return;
        };
        let reason = self.get_input("Reason for cancellation", None);
        match self.store.cancel(&id, &reason) {
            Ok(appointment) => println!(
                "\nCancelled {} ({})",
                appointment.patient_name,
                appointment.cancel_reason.unwrap_or_default()
            ),
            Err(e) => println!("\nCancel failed: {}", e),
        }
    }

    fn my_appointments(&self) {
        println!("\n--- My Appointments ---");
        let mobile = self.get_input("Mobile number", None);
        let history = self.query.history_for(&mobile);

        if history.is_empty() {
            println!("\nNo appointments booked yet");
            return;
        }

        for appt in history {
            let doctor = self
                .directory
                .get(&appt.doctor_id)
                .map(|d| d.name)
                .unwrap_or_else(|| "Unknown Doctor".to_string());
            print!(
                "\n{} with {} | Token: {} | {}",
                appt.start.format("%Y-%m-%d %H:%M"),
                doctor,
                appt.token,
                appt.status.name()
            );
            if let Some(reason) = &appt.cancel_reason {
                print!(" ({})", reason);
            }
            println!();
        }
    }

    fn doctor_dashboard(&self) {
        println!("\n--- Doctor Dashboard ---");
        let Some(doctor) = self.select_doctor() else {
            return;
        };

        let appointments = self.store.list_by_doctor(&doctor.id);
        println!("\n{} - {}", doctor.name, doctor.specialty);
        println!("Total appointments: {}", appointments.len());

        match self.query.next_for(&doctor.id, self.clock.now()) {
            Some(next) => println!(
                "Next: {} at {} (token {})",
                next.patient_name,
                next.start.format("%Y-%m-%d %H:%M"),
                next.token
            ),
            None => println!("Next: no upcoming appointments"),
        }

        let search = self.get_input("Search by patient name (blank for all)", Some(""));
        let shown = if search.trim().is_empty() {
            appointments
        } else {
            self.store
                .list_by_patient_name(&search)
                .into_iter()
                .filter(|a| a.doctor_id == doctor.id)
                .collect()
        };

        if shown.is_empty() {
            println!("\nNo appointments found");
            return;
        }
        for appt in shown {
            print!(
                "\n  {} | {} | Age {} | {} | Token {} | {}",
                appt.start.format("%Y-%m-%d %H:%M"),
                appt.patient_name,
                appt.age,
                appt.gender.name(),
                appt.token,
                appt.status.name()
            );
            if let Some(reason) = &appt.cancel_reason {
                print!(" ({})", reason);
            }
        }
        println!();
    }

    fn run_demo(&self) {
        println!("\n--- Running Demo ---");

        let tomorrow = (self.clock.now() + Duration::days(1)).date();
        let slots = SlotCalendar::daily_template("D1", tomorrow);

        let patients = [
            ("Asha Verma", 30, Gender::Female, "9876543210", 0),
            ("Ravi Kulkarni", 45, Gender::Male, "9822001122", 1),
            ("Meera Joshi", 27, Gender::Female, "9898989898", 8),
        ];

        println!("Booking {} appointments for {}...", patients.len(), tomorrow);
        let mut booked = Vec::new();
        for (name, age, gender, mobile, slot_index) in patients {
            let intake = PatientIntake {
                name: name.to_string(),
                age,
                gender,
                problem: "Consultation".to_string(),
                relation: "Self".to_string(),
                mobile: mobile.to_string(),
            };
            match self.booking.book("D1", &intake, &slots[slot_index]) {
                Ok(appointment) => {
                    println!(
                        "  {} -> {} (token {})",
                        appointment.patient_name,
                        appointment.start.format("%H:%M"),
                        appointment.token
                    );
                    booked.push(appointment);
                }
                Err(e) => println!("  {} -> failed: {}", name, e),
            }
        }

        if let Some(first) = booked.first() {
            let confirmed = self.store.confirm(&first.id);
            println!(
                "\nConfirmed {}: {}",
                first.patient_name,
                confirmed.is_ok()
            );
        }
        if let Some(last) = booked.last() {
            if self.store.cancel(&last.id, "Patient unavailable").is_ok() {
                println!("Cancelled {}: slot is open again", last.patient_name);
            }
        }

        let open = self
            .calendar
            .available_slots("D1", tomorrow, 1)
            .map(|slots| slots.count())
            .unwrap_or(0);
        println!("\nOpen slots left for D1 tomorrow: {}", open);
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(8));

            match choice {
                1 => self.list_doctors(),
                2 => self.view_open_slots(),
                3 => self.book_appointment(),
                4 => self.confirm_appointment(),
                5 => self.cancel_appointment(),
                6 => self.my_appointments(),
                7 => self.doctor_dashboard(),
                8 => self.run_demo(),
                9 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn seed_doctors() -> Vec<Doctor> {
    vec![
        Doctor::new(
            "D1".to_string(),
            "Dr. Asha Mehta".to_string(),
            "Cardiologist".to_string(),
            true,
            "09:30 AM - 06:15 PM".to_string(),
            "Senior cardiologist with 10+ years in clinical practice.".to_string(),
        )
        .unwrap(),
        Doctor::new(
            "D2".to_string(),
            "Dr. Nikhil Dere".to_string(),
            "Dermatologist".to_string(),
            true,
            "09:30 AM - 01:15 PM".to_string(),
            "Skin and allergy specialist, available for consultation.".to_string(),
        )
        .unwrap(),
        Doctor::new(
            "D3".to_string(),
            "Dr. Priya Nair".to_string(),
            "Immunologist".to_string(),
            false,
            "03:30 PM - 06:15 PM".to_string(),
            "Immunology consultant, evenings only.".to_string(),
        )
        .unwrap(),
    ]
}

fn main() {
    env_logger::init();
    let mut cli = MedibookCli::new();
    cli.run();
}
