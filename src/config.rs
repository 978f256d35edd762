use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinicore";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Orders strictly above this total ship free.
pub const FREE_DELIVERY_THRESHOLD: f64 = 500.0;

/// Flat delivery fee below the free-delivery threshold.
pub const DELIVERY_FEE: f64 = 50.0;

/// Days between order placement and estimated delivery.
pub const DELIVERY_LEAD_DAYS: i64 = 2;

/// Contact numbers are plain national mobile numbers, exactly this many digits.
pub const CONTACT_NUMBER_DIGITS: usize = 10;

/// Simulated order-processing delay standing in for a payment/network call.
pub const ORDER_PROCESSING_DELAY_MS: u64 = 2000;

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Clinicore/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clinicore")
}

/// Get the database file path
pub fn database_path() -> PathBuf {
    app_data_dir().join("clinicore.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Clinicore"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("clinicore.db"));
    }

    #[test]
    fn delivery_fee_below_threshold() {
        assert!(DELIVERY_FEE > 0.0);
        assert!(DELIVERY_FEE < FREE_DELIVERY_THRESHOLD);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
