use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Medicine;

use super::{encode_list, list_column};

const COLUMNS: &str = "id, name, generic_name, manufacturer, category, dosage_form,
     strength, price, in_stock, description, side_effects, prescription_required";

pub fn insert_medicine(conn: &Connection, medicine: &Medicine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicines (id, name, generic_name, manufacturer, category, dosage_form,
         strength, price, in_stock, description, side_effects, prescription_required)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            medicine.id,
            medicine.name,
            medicine.generic_name,
            medicine.manufacturer,
            medicine.category,
            medicine.dosage_form,
            medicine.strength,
            medicine.price,
            medicine.in_stock,
            medicine.description,
            encode_list(&medicine.side_effects),
            medicine.prescription_required,
        ],
    )?;
    Ok(())
}

pub fn get_medicine(conn: &Connection, id: &str) -> Result<Option<Medicine>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM medicines WHERE id = ?1"),
            params![id],
            medicine_row,
        )
        .optional()?;
    row.map(medicine_from_row).transpose()
}

pub fn list_medicines(conn: &Connection) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM medicines ORDER BY name"))?;
    let rows = stmt.query_map([], medicine_row)?;

    let mut medicines = Vec::new();
    for row in rows {
        medicines.push(medicine_from_row(row?)?);
    }
    Ok(medicines)
}

/// Case-insensitive substring search over name, generic name, and category.
pub fn search_medicines(conn: &Connection, term: &str) -> Result<Vec<Medicine>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM medicines
         WHERE LOWER(name) LIKE LOWER(?1)
            OR LOWER(generic_name) LIKE LOWER(?1)
            OR LOWER(category) LIKE LOWER(?1)
         ORDER BY name"
    ))?;
    let rows = stmt.query_map(params![pattern], medicine_row)?;

    let mut medicines = Vec::new();
    for row in rows {
        medicines.push(medicine_from_row(row?)?);
    }
    Ok(medicines)
}

// Internal row type for Medicine mapping
struct MedicineRow {
    id: String,
    name: String,
    generic_name: String,
    manufacturer: String,
    category: String,
    dosage_form: String,
    strength: String,
    price: f64,
    in_stock: bool,
    description: String,
    side_effects: String,
    prescription_required: bool,
}

fn medicine_row(row: &rusqlite::Row<'_>) -> Result<MedicineRow, rusqlite::Error> {
    Ok(MedicineRow {
        id: row.get(0)?,
        name: row.get(1)?,
        generic_name: row.get(2)?,
        manufacturer: row.get(3)?,
        category: row.get(4)?,
        dosage_form: row.get(5)?,
        strength: row.get(6)?,
        price: row.get(7)?,
        in_stock: row.get(8)?,
        description: row.get(9)?,
        side_effects: row.get(10)?,
        prescription_required: row.get(11)?,
    })
}

fn medicine_from_row(row: MedicineRow) -> Result<Medicine, DatabaseError> {
    Ok(Medicine {
        id: row.id,
        name: row.name,
        generic_name: row.generic_name,
        manufacturer: row.manufacturer,
        category: row.category,
        dosage_form: row.dosage_form,
        strength: row.strength,
        price: row.price,
        in_stock: row.in_stock,
        description: row.description,
        side_effects: list_column("side_effects", &row.side_effects)?,
        prescription_required: row.prescription_required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample(id: &str, name: &str, category: &str) -> Medicine {
        Medicine {
            id: id.into(),
            name: name.into(),
            generic_name: "Paracetamol".into(),
            manufacturer: "Cipla".into(),
            category: category.into(),
            dosage_form: "Tablet".into(),
            strength: "500mg".into(),
            price: 25.0,
            in_stock: true,
            description: String::new(),
            side_effects: vec!["Nausea".into()],
            prescription_required: false,
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let med = sample("med-1", "Crocin", "Pain Relief");
        insert_medicine(&conn, &med).unwrap();

        let loaded = get_medicine(&conn, "med-1").unwrap().unwrap();
        assert_eq!(loaded.name, "Crocin");
        assert_eq!(loaded.side_effects, vec!["Nausea".to_string()]);
        assert!(!loaded.prescription_required);
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_medicine(&conn, "nope").unwrap().is_none());
    }

    #[test]
    fn search_matches_name_generic_and_category() {
        let conn = open_memory_database().unwrap();
        insert_medicine(&conn, &sample("m1", "Crocin", "Pain Relief")).unwrap();
        insert_medicine(&conn, &sample("m2", "Azithral", "Antibiotic")).unwrap();

        assert_eq!(search_medicines(&conn, "croc").unwrap().len(), 1);
        assert_eq!(search_medicines(&conn, "paracetamol").unwrap().len(), 2);
        assert_eq!(search_medicines(&conn, "antibiotic").unwrap().len(), 1);
        assert!(search_medicines(&conn, "insulin").unwrap().is_empty());
    }
}
