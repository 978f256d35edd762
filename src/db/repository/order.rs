use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::OrderStatus;
use crate::models::{CartItem, Order};

/// Insert the order and its line items in one transaction. The medicine
/// snapshot travels as a JSON column so the stored order round-trips exactly.
pub fn insert_order(conn: &Connection, order: &Order) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO orders (id, total, delivery_address, contact_number, order_date,
         estimated_delivery, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            order.id,
            order.total,
            order.delivery_address,
            order.contact_number,
            order.order_date,
            order.estimated_delivery,
            order.status.as_str(),
        ],
    )?;

    for item in &order.items {
        let medicine = serde_json::to_string(&item.medicine)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        tx.execute(
            "INSERT INTO order_items (order_id, medicine_id, medicine, quantity)
             VALUES (?1, ?2, ?3, ?4)",
            params![order.id, item.medicine_id, medicine, item.quantity],
        )?;
    }

    tx.commit()?;
    Ok(())
}

pub fn get_order(conn: &Connection, id: &str) -> Result<Option<Order>, DatabaseError> {
    let header = conn
        .query_row(
            "SELECT id, total, delivery_address, contact_number, order_date,
             estimated_delivery, status
             FROM orders WHERE id = ?1",
            params![id],
            order_row,
        )
        .optional()?;

    let Some(row) = header else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT medicine_id, medicine, quantity FROM order_items WHERE order_id = ?1",
    )?;
    let rows = stmt.query_map(params![id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, u32>(2)?,
        ))
    })?;

    let mut items = Vec::new();
    for row in rows {
        let (medicine_id, medicine_json, quantity) = row?;
        let medicine = serde_json::from_str(&medicine_json)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        items.push(CartItem {
            medicine_id,
            medicine,
            quantity,
        });
    }

    Ok(Some(Order {
        id: row.id,
        items,
        total: row.total,
        delivery_address: row.delivery_address,
        contact_number: row.contact_number,
        order_date: row.order_date,
        estimated_delivery: row.estimated_delivery,
        status: OrderStatus::from_str(&row.status)?,
    }))
}

// Internal row type for the order header
struct OrderRow {
    id: String,
    total: f64,
    delivery_address: String,
    contact_number: String,
    order_date: DateTime<Utc>,
    estimated_delivery: NaiveDate,
    status: String,
}

fn order_row(row: &rusqlite::Row<'_>) -> Result<OrderRow, rusqlite::Error> {
    Ok(OrderRow {
        id: row.get(0)?,
        total: row.get(1)?,
        delivery_address: row.get(2)?,
        contact_number: row.get(3)?,
        order_date: row.get(4)?,
        estimated_delivery: row.get(5)?,
        status: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::Medicine;

    fn sample_medicine(id: &str, price: f64) -> Medicine {
        Medicine {
            id: id.into(),
            name: "Crocin".into(),
            generic_name: "Paracetamol".into(),
            manufacturer: "Cipla".into(),
            category: "Pain Relief".into(),
            dosage_form: "Tablet".into(),
            strength: "500mg".into(),
            price,
            in_stock: true,
            description: String::new(),
            side_effects: vec![],
            prescription_required: false,
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let order = Order {
            id: "ORD1724500000000".into(),
            items: vec![CartItem {
                medicine_id: "m1".into(),
                medicine: sample_medicine("m1", 120.0),
                quantity: 2,
            }],
            total: 290.0,
            delivery_address: "12 Lake Road".into(),
            contact_number: "9812345678".into(),
            order_date: Utc::now(),
            estimated_delivery: "2026-08-26".parse().unwrap(),
            status: OrderStatus::Confirmed,
        };

        insert_order(&conn, &order).unwrap();
        let loaded = get_order(&conn, "ORD1724500000000").unwrap().unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].quantity, 2);
        assert_eq!(loaded.items[0].medicine.price, 120.0);
        assert_eq!(loaded.status, OrderStatus::Confirmed);
        assert_eq!(loaded.total, 290.0);
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_order(&conn, "ORD0").unwrap().is_none());
    }
}
