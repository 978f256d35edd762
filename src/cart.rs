//! In-memory medicine cart.
//!
//! Session-scoped, never persisted — an order only materializes at checkout
//! (see `orders`). Totals are derived by folding over the line items on every
//! mutation rather than maintained incrementally, so they cannot drift from
//! the items themselves.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::config;
use crate::models::{CartItem, Medicine};

/// The cart. Fields are private so every mutation goes through the methods
/// that recompute the derived totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
    total: f64,
    item_count: u32,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Mutations ────────────────────────────────────────────────────────────

    /// Add a medicine. If it is already in the cart the quantity is bumped,
    /// never duplicated. A quantity of zero is treated as one so line items
    /// always carry at least one unit.
    pub fn add(&mut self, medicine: Medicine, quantity: u32) {
        let quantity = quantity.max(1);
        match self.items.iter().position(|i| i.medicine_id == medicine.id) {
            Some(idx) => self.items[idx].quantity += quantity,
            None => self.items.push(CartItem {
                medicine_id: medicine.id.clone(),
                medicine,
                quantity,
            }),
        }
        self.recompute();
    }

    /// Remove a line item. Absent ids are a no-op, not an error.
    pub fn remove(&mut self, medicine_id: &str) {
        self.items.retain(|i| i.medicine_id != medicine_id);
        self.recompute();
    }

    /// Replace a line item's quantity. Zero removes the item; absent ids are
    /// a no-op.
    pub fn set_quantity(&mut self, medicine_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(medicine_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.medicine_id == medicine_id) {
            item.quantity = quantity;
        }
        self.recompute();
    }

    /// Reset to the empty initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self) {
        self.total = self
            .items
            .iter()
            .map(|i| i.medicine.price * i.quantity as f64)
            .sum();
        self.item_count = self.items.iter().map(|i| i.quantity).sum();
    }

    // ─── Queries ──────────────────────────────────────────────────────────────

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of price × quantity over all line items, before delivery fee.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Total units across all line items.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, medicine_id: &str) -> bool {
        self.items.iter().any(|i| i.medicine_id == medicine_id)
    }

    /// Quantity for a medicine, zero if absent.
    pub fn quantity_of(&self, medicine_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.medicine_id == medicine_id)
            .map_or(0, |i| i.quantity)
    }
}

// ─── Checkout-time pricing ────────────────────────────────────────────────────

/// Flat fee, waived on totals strictly above the free-delivery threshold.
pub fn delivery_charge(total: f64) -> f64 {
    if total > config::FREE_DELIVERY_THRESHOLD {
        0.0
    } else {
        config::DELIVERY_FEE
    }
}

pub fn grand_total(total: f64) -> f64 {
    total + delivery_charge(total)
}

pub fn estimated_delivery(order_date: NaiveDate) -> NaiveDate {
    order_date + Duration::days(config::DELIVERY_LEAD_DAYS)
}
