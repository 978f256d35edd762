use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub medical_history: Vec<String>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
}
