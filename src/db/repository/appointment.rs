use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::{AppointmentStatus, AppointmentType};
use crate::models::Appointment;

const COLUMNS: &str = "id, doctor_id, doctor_name, patient_id, patient_name, patient_age,
     patient_gender, appointment_date, appointment_time, status, appointment_type,
     symptoms, diagnosis, prescription, notes, created_at";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, doctor_id, doctor_name, patient_id, patient_name,
         patient_age, patient_gender, appointment_date, appointment_time, status,
         appointment_type, symptoms, diagnosis, prescription, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            appt.id,
            appt.doctor_id,
            appt.doctor_name,
            appt.patient_id,
            appt.patient_name,
            appt.patient_age,
            appt.patient_gender,
            appt.appointment_date,
            appt.appointment_time,
            appt.status.as_str(),
            appt.appointment_type.as_str(),
            appt.symptoms,
            appt.diagnosis,
            appt.prescription,
            appt.notes,
            appt.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_appointment(conn: &Connection, id: &str) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM appointments WHERE id = ?1"),
            params![id],
            appointment_row,
        )
        .optional()?;
    row.map(appointment_from_row).transpose()
}

/// Equality filter on doctor_id. Unsorted; callers order through the pure
/// derivation layer in `appointments`.
pub fn appointments_for_doctor(
    conn: &Connection,
    doctor_id: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    query_appointments(
        conn,
        &format!("SELECT {COLUMNS} FROM appointments WHERE doctor_id = ?1"),
        params![doctor_id],
    )
}

pub fn appointments_for_patient(
    conn: &Connection,
    patient_id: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    query_appointments(
        conn,
        &format!("SELECT {COLUMNS} FROM appointments WHERE patient_id = ?1"),
        params![patient_id],
    )
}

pub fn appointments_for_doctor_on(
    conn: &Connection,
    doctor_id: &str,
    date: NaiveDate,
) -> Result<Vec<Appointment>, DatabaseError> {
    query_appointments(
        conn,
        &format!("SELECT {COLUMNS} FROM appointments WHERE doctor_id = ?1 AND appointment_date = ?2"),
        params![doctor_id, date],
    )
}

/// Partial update of the status column only. The state machine lives in the
/// `appointments` module; this is the raw write.
pub fn update_status(
    conn: &Connection,
    id: &str,
    status: AppointmentStatus,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE appointments SET status = ?2 WHERE id = ?1",
        params![id, status.as_str()],
    )?;
    Ok(())
}

fn query_appointments(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, appointment_row)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row?)?);
    }
    Ok(appointments)
}

// Internal row type for Appointment mapping
struct AppointmentRow {
    id: String,
    doctor_id: String,
    doctor_name: String,
    patient_id: String,
    patient_name: String,
    patient_age: u32,
    patient_gender: String,
    appointment_date: NaiveDate,
    appointment_time: String,
    status: String,
    appointment_type: String,
    symptoms: String,
    diagnosis: Option<String>,
    prescription: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

fn appointment_row(row: &rusqlite::Row<'_>) -> Result<AppointmentRow, rusqlite::Error> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        doctor_id: row.get(1)?,
        doctor_name: row.get(2)?,
        patient_id: row.get(3)?,
        patient_name: row.get(4)?,
        patient_age: row.get(5)?,
        patient_gender: row.get(6)?,
        appointment_date: row.get(7)?,
        appointment_time: row.get(8)?,
        status: row.get(9)?,
        appointment_type: row.get(10)?,
        symptoms: row.get(11)?,
        diagnosis: row.get(12)?,
        prescription: row.get(13)?,
        notes: row.get(14)?,
        created_at: row.get(15)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: row.id,
        doctor_id: row.doctor_id,
        doctor_name: row.doctor_name,
        patient_id: row.patient_id,
        patient_name: row.patient_name,
        patient_age: row.patient_age,
        patient_gender: row.patient_gender,
        appointment_date: row.appointment_date,
        appointment_time: row.appointment_time,
        status: AppointmentStatus::from_str(&row.status)?,
        appointment_type: AppointmentType::from_str(&row.appointment_type)?,
        symptoms: row.symptoms,
        diagnosis: row.diagnosis,
        prescription: row.prescription,
        notes: row.notes,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample(id: &str, doctor_id: &str, patient_id: &str, date: &str) -> Appointment {
        Appointment {
            id: id.into(),
            doctor_id: doctor_id.into(),
            doctor_name: "Dr. Mehta".into(),
            patient_id: patient_id.into(),
            patient_name: "Asha Kumar".into(),
            patient_age: 34,
            patient_gender: "Female".into(),
            appointment_date: date.parse().unwrap(),
            appointment_time: "10:30".into(),
            status: AppointmentStatus::Scheduled,
            appointment_type: AppointmentType::Consultation,
            symptoms: "Persistent cough".into(),
            diagnosis: None,
            prescription: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &sample("apt-1", "doc-1", "pat-1", "2026-09-01")).unwrap();

        let loaded = get_appointment(&conn, "apt-1").unwrap().unwrap();
        assert_eq!(loaded.doctor_id, "doc-1");
        assert_eq!(loaded.status, AppointmentStatus::Scheduled);
        assert_eq!(loaded.appointment_time, "10:30");
        assert_eq!(loaded.appointment_date.to_string(), "2026-09-01");
    }

    #[test]
    fn filters_by_doctor_patient_and_date() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &sample("a1", "d1", "p1", "2026-09-01")).unwrap();
        insert_appointment(&conn, &sample("a2", "d1", "p2", "2026-09-02")).unwrap();
        insert_appointment(&conn, &sample("a3", "d2", "p1", "2026-09-01")).unwrap();

        assert_eq!(appointments_for_doctor(&conn, "d1").unwrap().len(), 2);
        assert_eq!(appointments_for_patient(&conn, "p1").unwrap().len(), 2);
        let date: NaiveDate = "2026-09-01".parse().unwrap();
        assert_eq!(
            appointments_for_doctor_on(&conn, "d1", date).unwrap().len(),
            1
        );
        assert!(appointments_for_doctor(&conn, "d9").unwrap().is_empty());
    }

    #[test]
    fn update_status_persists() {
        let conn = open_memory_database().unwrap();
        insert_appointment(&conn, &sample("a1", "d1", "p1", "2026-09-01")).unwrap();

        update_status(&conn, "a1", AppointmentStatus::InProgress).unwrap();
        let loaded = get_appointment(&conn, "a1").unwrap().unwrap();
        assert_eq!(loaded.status, AppointmentStatus::InProgress);
    }
}
