use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::OrderStatus;
use super::medicine::Medicine;

/// One medicine entry in the cart. `medicine` is the catalog record copied at
/// add time; it is never re-fetched on later quantity changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub medicine_id: String,
    pub medicine: Medicine,
    pub quantity: u32,
}

/// The record produced at checkout. `total` is the grand total including the
/// delivery fee, not the bare cart total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub delivery_address: String,
    pub contact_number: String,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery: NaiveDate,
    pub status: OrderStatus,
}
