use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub qualification: String,
    pub experience_years: u32,
    pub hospital: String,
    pub location: String,
    pub availability: String,
    pub consultation_fee: f64,
    pub rating: f64,
    pub phone: String,
    pub email: String,
}
