use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, AppointmentType};

/// A booked consultation. Patient name/age/gender are a snapshot taken at
/// booking time; later profile edits do not rewrite appointment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub appointment_date: NaiveDate,
    /// Zero-padded 24h "HH:MM"; lexicographic order is chronological order.
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub appointment_type: AppointmentType,
    pub symptoms: String,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
