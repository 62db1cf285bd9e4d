//! Shared domain types and configuration for the hawkr workspace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod app_config;
pub mod config;
mod geo;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::GeoPoint;

/// A registered street-food vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub vendor_id: String,
    pub name: String,
    pub phone: String,
    pub business_hours: Option<String>,
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
}

/// A single item on a vendor's menu.
///
/// `price` of zero means "unpriced" — allowed for manually-added items,
/// never produced by the OCR extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_id: String,
    pub vendor_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

/// A time-limited price promotion pinned to a vendor's location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub deal_id: String,
    pub vendor_id: String,
    pub item_name: String,
    pub original_price: Option<Decimal>,
    pub deal_price: Decimal,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Generate a short prefixed record id, e.g. `v_1f3a9c2e`.
///
/// Ids are the prefix character, an underscore, and the first eight hex
/// characters of a fresh `UUIDv4`.
#[must_use]
pub fn prefixed_id(prefix: char) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_id_has_expected_shape() {
        let id = prefixed_id('v');
        assert_eq!(id.len(), 10);
        assert!(id.starts_with("v_"));
        assert!(id[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = prefixed_id('m');
        let b = prefixed_id('m');
        assert_ne!(a, b);
    }

    #[test]
    fn vendor_serializes_location_as_nested_object() {
        let vendor = Vendor {
            vendor_id: "v_12345678".to_string(),
            name: "Taco Cart".to_string(),
            phone: "+15125550100".to_string(),
            business_hours: Some("11am-9pm".to_string()),
            location: Some(GeoPoint {
                lat: 30.2672,
                lng: -97.7431,
            }),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&vendor).expect("serialize");
        assert_eq!(json["vendor_id"], "v_12345678");
        assert!((json["location"]["lat"].as_f64().unwrap() - 30.2672).abs() < 1e-9);
    }
}
