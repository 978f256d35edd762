pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod lab_report;
pub mod medicine;
pub mod order;
pub mod patient;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use enums::*;
pub use lab_report::LabReport;
pub use medicine::Medicine;
pub use order::{CartItem, Order};
pub use patient::Patient;
