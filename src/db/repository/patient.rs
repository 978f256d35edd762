use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Patient;

use super::{encode_list, list_column};

const COLUMNS: &str = "id, name, age, gender, blood_group, phone, email, address,
     medical_history, allergies, current_medications";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, age, gender, blood_group, phone, email, address,
         medical_history, allergies, current_medications)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            patient.id,
            patient.name,
            patient.age,
            patient.gender,
            patient.blood_group,
            patient.phone,
            patient.email,
            patient.address,
            encode_list(&patient.medical_history),
            encode_list(&patient.allergies),
            encode_list(&patient.current_medications),
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &str) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM patients WHERE id = ?1"),
            params![id],
            patient_row,
        )
        .optional()?;
    row.map(patient_from_row).transpose()
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM patients ORDER BY name"))?;
    let rows = stmt.query_map([], patient_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

// Internal row type for Patient mapping
struct PatientRow {
    id: String,
    name: String,
    age: u32,
    gender: String,
    blood_group: String,
    phone: String,
    email: String,
    address: String,
    medical_history: String,
    allergies: String,
    current_medications: String,
}

fn patient_row(row: &rusqlite::Row<'_>) -> Result<PatientRow, rusqlite::Error> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        blood_group: row.get(4)?,
        phone: row.get(5)?,
        email: row.get(6)?,
        address: row.get(7)?,
        medical_history: row.get(8)?,
        allergies: row.get(9)?,
        current_medications: row.get(10)?,
    })
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: row.id,
        name: row.name,
        age: row.age,
        gender: row.gender,
        blood_group: row.blood_group,
        phone: row.phone,
        email: row.email,
        address: row.address,
        medical_history: list_column("medical_history", &row.medical_history)?,
        allergies: list_column("allergies", &row.allergies)?,
        current_medications: list_column("current_medications", &row.current_medications)?,
    })
}
