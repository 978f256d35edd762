pub mod appointment;
pub mod doctor;
pub mod lab_report;
pub mod medicine;
pub mod order;
pub mod patient;

use super::DatabaseError;

/// Parse a JSON-encoded list column (allergies, side effects, ...).
pub(crate) fn list_column(column: &str, raw: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| {
        DatabaseError::ConstraintViolation(format!("malformed {column} column: {e}"))
    })
}

/// Encode a list column for storage.
pub(crate) fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".into())
}
