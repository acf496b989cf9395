use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded position. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GeoSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
}

impl GeoSample {
    pub fn new(latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Latitude and longitude are finite and inside their degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_checks() {
        assert!(GeoSample::new(1.2966, 103.7764, 0).is_valid());
        assert!(GeoSample::new(-90.0, 180.0, 0).is_valid());
        assert!(!GeoSample::new(90.5, 0.0, 0).is_valid());
        assert!(!GeoSample::new(0.0, -180.1, 0).is_valid());
        assert!(!GeoSample::new(f64::NAN, 0.0, 0).is_valid());
    }

    #[test]
    fn captured_at_from_millis() {
        let sample = GeoSample::new(0.0, 0.0, 1_700_000_000_123);
        let at = sample.captured_at().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
        assert_eq!(at.timestamp_subsec_millis(), 123);
    }
}
