use serde::{Deserialize, Serialize};

/// Catalog entry for a purchasable medicine. The cart stores a full copy of
/// this record per line item, captured at add-to-cart time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub category: String,
    pub dosage_form: String,
    pub strength: String,
    pub price: f64,
    pub in_stock: bool,
    pub description: String,
    pub side_effects: Vec<String>,
    pub prescription_required: bool,
}
