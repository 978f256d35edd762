use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::ReportFileType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabReport {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub report_type: String,
    pub report_date: NaiveDate,
    pub file_name: String,
    pub file_type: ReportFileType,
    pub notes: Option<String>,
}
