use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::ReportFileType;
use crate::models::LabReport;

const COLUMNS: &str =
    "id, patient_id, patient_name, report_type, report_date, file_name, file_type, notes";

pub fn insert_lab_report(conn: &Connection, report: &LabReport) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO lab_reports (id, patient_id, patient_name, report_type, report_date,
         file_name, file_type, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            report.id,
            report.patient_id,
            report.patient_name,
            report.report_type,
            report.report_date,
            report.file_name,
            report.file_type.as_str(),
            report.notes,
        ],
    )?;
    Ok(())
}

pub fn get_lab_report(conn: &Connection, id: &str) -> Result<Option<LabReport>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM lab_reports WHERE id = ?1"),
            params![id],
            report_row,
        )
        .optional()?;
    row.map(report_from_row).transpose()
}

/// All reports for one patient, most recent first.
pub fn reports_for_patient(
    conn: &Connection,
    patient_id: &str,
) -> Result<Vec<LabReport>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM lab_reports WHERE patient_id = ?1 ORDER BY report_date DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id], report_row)?;

    let mut reports = Vec::new();
    for row in rows {
        reports.push(report_from_row(row?)?);
    }
    Ok(reports)
}

// Internal row type for LabReport mapping
struct ReportRow {
    id: String,
    patient_id: String,
    patient_name: String,
    report_type: String,
    report_date: NaiveDate,
    file_name: String,
    file_type: String,
    notes: Option<String>,
}

fn report_row(row: &rusqlite::Row<'_>) -> Result<ReportRow, rusqlite::Error> {
    Ok(ReportRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        patient_name: row.get(2)?,
        report_type: row.get(3)?,
        report_date: row.get(4)?,
        file_name: row.get(5)?,
        file_type: row.get(6)?,
        notes: row.get(7)?,
    })
}

fn report_from_row(row: ReportRow) -> Result<LabReport, DatabaseError> {
    Ok(LabReport {
        id: row.id,
        patient_id: row.patient_id,
        patient_name: row.patient_name,
        report_type: row.report_type,
        report_date: row.report_date,
        file_name: row.file_name,
        file_type: ReportFileType::from_str(&row.file_type)?,
        notes: row.notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample(id: &str, patient_id: &str, date: &str) -> LabReport {
        LabReport {
            id: id.into(),
            patient_id: patient_id.into(),
            patient_name: "Asha Kumar".into(),
            report_type: "Blood Test".into(),
            report_date: date.parse().unwrap(),
            file_name: "cbc.pdf".into(),
            file_type: ReportFileType::Pdf,
            notes: None,
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        insert_lab_report(&conn, &sample("r1", "p1", "2026-08-01")).unwrap();

        let loaded = get_lab_report(&conn, "r1").unwrap().unwrap();
        assert_eq!(loaded.report_type, "Blood Test");
        assert_eq!(loaded.file_type, ReportFileType::Pdf);
    }

    #[test]
    fn reports_for_patient_newest_first() {
        let conn = open_memory_database().unwrap();
        insert_lab_report(&conn, &sample("r1", "p1", "2026-07-01")).unwrap();
        insert_lab_report(&conn, &sample("r2", "p1", "2026-08-01")).unwrap();
        insert_lab_report(&conn, &sample("r3", "p2", "2026-08-15")).unwrap();

        let reports = reports_for_patient(&conn, "p1").unwrap();
        let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r1"]);
    }

    #[test]
    fn no_reports_is_empty_not_error() {
        let conn = open_memory_database().unwrap();
        assert!(reports_for_patient(&conn, "p9").unwrap().is_empty());
    }
}
