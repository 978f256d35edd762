//! Appointment booking, status lifecycle, and role-scoped views.
//!
//! The status machine is deliberately small: scheduled consultations can
//! start or be cancelled, an in-progress consultation can only complete,
//! and completed/cancelled are terminal. Everything a portal screen shows
//! (today's schedule, visit history, a doctor's patient roster, report
//! visibility) is derived from the appointment collection — there is no
//! separate ACL: a doctor sees a patient's lab reports only if at least one
//! appointment links the two.

use chrono::{Local, NaiveDate, NaiveTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{repository, DatabaseError};
use crate::models::enums::{AppointmentStatus, AppointmentType};
use crate::models::{Appointment, LabReport, Patient};

// ─── Types ────────────────────────────────────────────────────────────────────

/// Request to book an appointment. The patient snapshot (name/age/gender) is
/// resolved from the patient record at booking time, not supplied by the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub doctor_id: String,
    pub patient_id: String,
    pub appointment_date: NaiveDate,
    /// Zero-padded 24h "HH:MM".
    pub appointment_time: String,
    pub appointment_type: AppointmentType,
    pub symptoms: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("No doctor with id {0}")]
    UnknownDoctor(String),

    #[error("No patient with id {0}")]
    UnknownPatient(String),

    #[error("No appointment with id {0}")]
    UnknownAppointment(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Invalid appointment time {0:?}, expected zero-padded HH:MM")]
    InvalidTime(String),

    #[error("Appointment date {0} is in the past")]
    DateInPast(NaiveDate),

    #[error("Symptoms description is required")]
    EmptySymptoms,
}

// ─── Booking ──────────────────────────────────────────────────────────────────

/// Book an appointment. Created in `scheduled` status with a denormalized
/// patient snapshot so later profile edits don't rewrite history.
pub fn book_appointment(
    conn: &Connection,
    request: &BookingRequest,
) -> Result<Appointment, AppointmentError> {
    validate_booking(request, Local::now().date_naive())?;

    let doctor = repository::doctor::get_doctor(conn, &request.doctor_id)?
        .ok_or_else(|| AppointmentError::UnknownDoctor(request.doctor_id.clone()))?;
    let patient = repository::patient::get_patient(conn, &request.patient_id)?
        .ok_or_else(|| AppointmentError::UnknownPatient(request.patient_id.clone()))?;

    let appointment = Appointment {
        id: Uuid::new_v4().to_string(),
        doctor_id: doctor.id,
        doctor_name: doctor.name,
        patient_id: patient.id,
        patient_name: patient.name,
        patient_age: patient.age,
        patient_gender: patient.gender,
        appointment_date: request.appointment_date,
        appointment_time: request.appointment_time.clone(),
        status: AppointmentStatus::Scheduled,
        appointment_type: request.appointment_type,
        symptoms: request.symptoms.trim().to_string(),
        diagnosis: None,
        prescription: None,
        notes: None,
        created_at: Utc::now(),
    };

    repository::appointment::insert_appointment(conn, &appointment)?;
    tracing::info!(
        appointment_id = %appointment.id,
        doctor_id = %appointment.doctor_id,
        date = %appointment.appointment_date,
        "appointment booked"
    );
    Ok(appointment)
}

fn validate_booking(request: &BookingRequest, today: NaiveDate) -> Result<(), AppointmentError> {
    if request.symptoms.trim().is_empty() {
        return Err(AppointmentError::EmptySymptoms);
    }
    let time = &request.appointment_time;
    if time.len() != 5 || NaiveTime::parse_from_str(time, "%H:%M").is_err() {
        return Err(AppointmentError::InvalidTime(time.clone()));
    }
    if request.appointment_date < today {
        return Err(AppointmentError::DateInPast(request.appointment_date));
    }
    Ok(())
}

// ─── Status lifecycle ─────────────────────────────────────────────────────────

/// Move an appointment to a new status. Only the transitions in
/// [`AppointmentStatus::can_transition_to`] are accepted; anything else —
/// including any move out of a terminal state — is rejected without a write.
pub fn update_status(
    conn: &Connection,
    id: &str,
    next: AppointmentStatus,
) -> Result<Appointment, AppointmentError> {
    let appointment = repository::appointment::get_appointment(conn, id)?
        .ok_or_else(|| AppointmentError::UnknownAppointment(id.to_string()))?;

    if !appointment.status.can_transition_to(next) {
        return Err(AppointmentError::InvalidTransition {
            from: appointment.status,
            to: next,
        });
    }

    repository::appointment::update_status(conn, id, next)?;
    tracing::info!(appointment_id = %id, from = %appointment.status, to = %next, "status updated");
    Ok(Appointment {
        status: next,
        ..appointment
    })
}

// ─── Pure derivations ─────────────────────────────────────────────────────────
//
// These operate on already-fetched collections and never fail: empty input
// yields empty output.

/// A doctor's schedule for one day, earliest slot first. Zero-padded "HH:MM"
/// strings order lexicographically, which is chronological order.
pub fn today_for_doctor(
    doctor_id: &str,
    appointments: &[Appointment],
    today: NaiveDate,
) -> Vec<Appointment> {
    let mut out: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.doctor_id == doctor_id && a.appointment_date == today)
        .cloned()
        .collect();
    out.sort_by(|a, b| a.appointment_time.cmp(&b.appointment_time));
    out
}

/// Visit history for a doctor, most recent date first.
pub fn for_doctor(doctor_id: &str, appointments: &[Appointment]) -> Vec<Appointment> {
    let mut out: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.doctor_id == doctor_id)
        .cloned()
        .collect();
    sort_history(&mut out);
    out
}

/// Visit history for a patient, most recent date first.
pub fn for_patient(patient_id: &str, appointments: &[Appointment]) -> Vec<Appointment> {
    let mut out: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.patient_id == patient_id)
        .cloned()
        .collect();
    sort_history(&mut out);
    out
}

// Same-date appointments tie-break by time, then id, so history views are
// deterministic.
fn sort_history(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        b.appointment_date
            .cmp(&a.appointment_date)
            .then_with(|| a.appointment_time.cmp(&b.appointment_time))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Distinct patient ids across a doctor's appointments, in first-seen order.
/// The roster is derived, never stored.
pub fn distinct_patient_ids(doctor_id: &str, appointments: &[Appointment]) -> Vec<String> {
    let mut seen = Vec::new();
    for appointment in appointments.iter().filter(|a| a.doctor_id == doctor_id) {
        if !seen.contains(&appointment.patient_id) {
            seen.push(appointment.patient_id.clone());
        }
    }
    seen
}

/// The one authorization rule of the system: a doctor may see a patient's lab
/// reports only if at least one appointment (of any status) links the pair.
pub fn reports_visible_to_doctor(
    doctor_id: &str,
    patient_id: &str,
    appointments: &[Appointment],
    reports: &[LabReport],
) -> Vec<LabReport> {
    let has_appointment = appointments
        .iter()
        .any(|a| a.doctor_id == doctor_id && a.patient_id == patient_id);
    if !has_appointment {
        return Vec::new();
    }
    reports
        .iter()
        .filter(|r| r.patient_id == patient_id)
        .cloned()
        .collect()
}

// ─── Storage-backed views ─────────────────────────────────────────────────────

/// Today's schedule for a doctor, fetched and sorted.
pub fn doctor_schedule_for(
    conn: &Connection,
    doctor_id: &str,
    date: NaiveDate,
) -> Result<Vec<Appointment>, DatabaseError> {
    let appointments = repository::appointment::appointments_for_doctor_on(conn, doctor_id, date)?;
    Ok(today_for_doctor(doctor_id, &appointments, date))
}

pub fn doctor_history(
    conn: &Connection,
    doctor_id: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    let appointments = repository::appointment::appointments_for_doctor(conn, doctor_id)?;
    Ok(for_doctor(doctor_id, &appointments))
}

pub fn patient_history(
    conn: &Connection,
    patient_id: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    let appointments = repository::appointment::appointments_for_patient(conn, patient_id)?;
    Ok(for_patient(patient_id, &appointments))
}

/// Resolve a doctor's derived roster to full patient records. Ids with no
/// resolvable record are silently dropped, not an error.
pub fn doctor_patient_roster(
    conn: &Connection,
    doctor_id: &str,
) -> Result<Vec<Patient>, DatabaseError> {
    let appointments = repository::appointment::appointments_for_doctor(conn, doctor_id)?;

    let mut roster = Vec::new();
    for patient_id in distinct_patient_ids(doctor_id, &appointments) {
        if let Some(patient) = repository::patient::get_patient(conn, &patient_id)? {
            roster.push(patient);
        }
    }
    Ok(roster)
}

/// Lab reports for a patient, gated on the doctor-patient appointment
/// relationship.
pub fn patient_reports_for_doctor(
    conn: &Connection,
    doctor_id: &str,
    patient_id: &str,
) -> Result<Vec<LabReport>, DatabaseError> {
    let appointments = repository::appointment::appointments_for_doctor(conn, doctor_id)?;
    let reports = repository::lab_report::reports_for_patient(conn, patient_id)?;
    Ok(reports_visible_to_doctor(
        doctor_id,
        patient_id,
        &appointments,
        &reports,
    ))
}
