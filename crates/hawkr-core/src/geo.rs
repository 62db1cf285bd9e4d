use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Whether both coordinates are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_point_accepted() {
        assert!(GeoPoint {
            lat: 30.2672,
            lng: -97.7431
        }
        .is_valid());
    }

    #[test]
    fn poles_and_antimeridian_are_valid() {
        assert!(GeoPoint {
            lat: -90.0,
            lng: 180.0
        }
        .is_valid());
    }

    #[test]
    fn out_of_range_latitude_rejected() {
        assert!(!GeoPoint {
            lat: 90.5,
            lng: 0.0
        }
        .is_valid());
    }

    #[test]
    fn nan_rejected() {
        assert!(!GeoPoint {
            lat: f64::NAN,
            lng: 0.0
        }
        .is_valid());
    }
}
