//! Checkout: validation, order synthesis, persistence.
//!
//! Order placement is the one asynchronous operation in the core — a
//! simulated processing delay stands in for a real payment/network call.
//! It either fully succeeds (order persisted, cart cleared) or fails with
//! the cart untouched; there is no partial state to roll back.

use chrono::Utc;
use rusqlite::Connection;

use crate::cart::{estimated_delivery, grand_total, Cart};
use crate::config;
use crate::db::{repository, DatabaseError};
use crate::models::enums::OrderStatus;
use crate::models::Order;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Delivery address is required")]
    MissingAddress,

    #[error("Contact number is required")]
    MissingContact,

    #[error("Contact number must be exactly {} digits", config::CONTACT_NUMBER_DIGITS)]
    InvalidContactNumber,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Checks that block an order before anything happens: non-empty cart,
/// an address, and a well-formed contact number.
pub fn validate(cart: &Cart, address: &str, contact: &str) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if address.trim().is_empty() {
        return Err(CheckoutError::MissingAddress);
    }
    if contact.trim().is_empty() {
        return Err(CheckoutError::MissingContact);
    }
    if contact.len() != config::CONTACT_NUMBER_DIGITS
        || !contact.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CheckoutError::InvalidContactNumber);
    }
    Ok(())
}

/// Place an order for the cart's contents. Validates, waits out the simulated
/// processing delay, persists the order, and clears the cart.
pub async fn place_order(
    conn: &Connection,
    cart: &mut Cart,
    address: &str,
    contact: &str,
) -> Result<Order, CheckoutError> {
    validate(cart, address, contact)?;

    tokio::time::sleep(std::time::Duration::from_millis(
        config::ORDER_PROCESSING_DELAY_MS,
    ))
    .await;

    finalize(conn, cart, address, contact)
}

/// Synchronous tail of checkout, split out so the simulated delay is not in
/// the way of exercising the success path.
fn finalize(
    conn: &Connection,
    cart: &mut Cart,
    address: &str,
    contact: &str,
) -> Result<Order, CheckoutError> {
    let now = Utc::now();
    let order = Order {
        id: format!("ORD{}", now.timestamp_millis()),
        items: cart.items().to_vec(),
        total: grand_total(cart.total()),
        delivery_address: address.trim().to_string(),
        contact_number: contact.to_string(),
        order_date: now,
        estimated_delivery: estimated_delivery(now.date_naive()),
        status: OrderStatus::Confirmed,
    };

    repository::order::insert_order(conn, &order)?;
    cart.clear();

    tracing::info!(
        order_id = %order.id,
        total = order.total,
        items = order.items.len(),
        "order placed"
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::Medicine;

    fn medicine(id: &str, price: f64) -> Medicine {
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

    fn loaded_cart(total_price: f64) -> Cart {
        let mut cart = Cart::new();
        cart.add(medicine("m1", total_price), 1);
        cart
    }

    #[test]
    fn rejects_empty_cart() {
        let cart = Cart::new();
        assert!(matches!(
            validate(&cart, "12 Lake Road", "9812345678"),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn rejects_missing_address_and_contact() {
        let cart = loaded_cart(100.0);
        assert!(matches!(
            validate(&cart, "  ", "9812345678"),
            Err(CheckoutError::MissingAddress)
        ));
        assert!(matches!(
            validate(&cart, "12 Lake Road", ""),
            Err(CheckoutError::MissingContact)
        ));
    }

    #[test]
    fn rejects_malformed_contact_number() {
        let cart = loaded_cart(100.0);
        for bad in ["981234567", "98123456789", "981234567a", "9812-45678"] {
            assert!(matches!(
                validate(&cart, "12 Lake Road", bad),
                Err(CheckoutError::InvalidContactNumber)
            ));
        }
        assert!(validate(&cart, "12 Lake Road", "9812345678").is_ok());
    }

    #[test]
    fn failed_validation_leaves_cart_untouched() {
        let conn = open_memory_database().unwrap();
        let mut cart = loaded_cart(100.0);

        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(place_order(&conn, &mut cart, "", "9812345678"));
        assert!(result.is_err());
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), 100.0);
    }

    #[test]
    fn finalize_persists_order_and_clears_cart() {
        let conn = open_memory_database().unwrap();
        let mut cart = Cart::new();
        cart.add(medicine("m1", 150.0), 3);

        let order = finalize(&conn, &mut cart, "12 Lake Road", "9812345678").unwrap();

        assert!(order.id.starts_with("ORD"));
        assert_eq!(order.status, OrderStatus::Confirmed);
        // 450 cart total + 50 delivery fee
        assert_eq!(order.total, 500.0);
        assert_eq!(
            order.estimated_delivery,
            order.order_date.date_naive() + chrono::Duration::days(2)
        );
        assert!(cart.is_empty());

        let stored = repository::order::get_order(&conn, &order.id).unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].quantity, 3);
    }

    #[test]
    fn free_delivery_above_threshold() {
        let conn = open_memory_database().unwrap();
        let mut cart = Cart::new();
        cart.add(medicine("m1", 600.0), 1);

        let order = finalize(&conn, &mut cart, "12 Lake Road", "9812345678").unwrap();
        assert_eq!(order.total, 600.0);
    }
}
