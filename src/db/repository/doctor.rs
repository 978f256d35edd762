use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Doctor;

const COLUMNS: &str = "id, name, specialization, qualification, experience_years,
     hospital, location, availability, consultation_fee, rating, phone, email";

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, name, specialization, qualification, experience_years,
         hospital, location, availability, consultation_fee, rating, phone, email)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            doctor.id,
            doctor.name,
            doctor.specialization,
            doctor.qualification,
            doctor.experience_years,
            doctor.hospital,
            doctor.location,
            doctor.availability,
            doctor.consultation_fee,
            doctor.rating,
            doctor.phone,
            doctor.email,
        ],
    )?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: &str) -> Result<Option<Doctor>, DatabaseError> {
    let doctor = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM doctors WHERE id = ?1"),
            params![id],
            doctor_from_row,
        )
        .optional()?;
    Ok(doctor)
}

pub fn list_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM doctors ORDER BY name"))?;
    let rows = stmt.query_map([], doctor_from_row)?;

    let mut doctors = Vec::new();
    for row in rows {
        doctors.push(row?);
    }
    Ok(doctors)
}

fn doctor_from_row(row: &rusqlite::Row<'_>) -> Result<Doctor, rusqlite::Error> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        qualification: row.get(3)?,
        experience_years: row.get(4)?,
        hospital: row.get(5)?,
        location: row.get(6)?,
        availability: row.get(7)?,
        consultation_fee: row.get(8)?,
        rating: row.get(9)?,
        phone: row.get(10)?,
        email: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample(id: &str, name: &str) -> Doctor {
        Doctor {
            id: id.into(),
            name: name.into(),
            specialization: "Cardiology".into(),
            qualification: "MD".into(),
            experience_years: 12,
            hospital: "City Hospital".into(),
            location: "Mumbai".into(),
            availability: "Mon-Fri 10:00-17:00".into(),
            consultation_fee: 800.0,
            rating: 4.6,
            phone: "9876543210".into(),
            email: "doc@example.com".into(),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        insert_doctor(&conn, &sample("doc-1", "Dr. Mehta")).unwrap();

        let loaded = get_doctor(&conn, "doc-1").unwrap().unwrap();
        assert_eq!(loaded.name, "Dr. Mehta");
        assert_eq!(loaded.experience_years, 12);
    }

    #[test]
    fn list_is_sorted_by_name() {
        let conn = open_memory_database().unwrap();
        insert_doctor(&conn, &sample("d2", "Dr. Rao")).unwrap();
        insert_doctor(&conn, &sample("d1", "Dr. Iyer")).unwrap();

        let names: Vec<String> = list_doctors(&conn)
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Dr. Iyer", "Dr. Rao"]);
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_doctor(&conn, "ghost").unwrap().is_none());
    }
}
