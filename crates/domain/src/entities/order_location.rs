//! Order endpoint location entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// The named, timestamped, geolocated point of one order endpoint
///
/// `point` stays `None` until the order has been geocoded at least once.
/// The label may be stale relative to the point after a manual edit that
/// changed only the coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLocation {
    /// Free-text address label
    pub label: String,
    /// Scheduled pickup or dropoff time
    pub time: DateTime<Utc>,
    /// Confirmed coordinates, once known
    pub point: Option<GeoPoint>,
}

impl OrderLocation {
    /// Create a location with known coordinates
    #[must_use]
    pub fn new(label: impl Into<String>, time: DateTime<Utc>, point: GeoPoint) -> Self {
        Self {
            label: label.into(),
            time,
            point: Some(point),
        }
    }

    /// Create a location that has never been geocoded
    #[must_use]
    pub fn ungeocoded(label: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            time,
            point: None,
        }
    }

    /// A copy with a new label and point, keeping the timestamp
    #[must_use]
    pub fn with_confirmed(&self, label: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            label: label.into(),
            time: self.time,
            point: Some(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_time() -> DateTime<Utc> {
        chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_has_point() {
        let point = GeoPoint::new(50.8503, 4.3517).expect("valid");
        let location = OrderLocation::new("Brussels", sample_time(), point);
        assert_eq!(location.label, "Brussels");
        assert_eq!(location.point, Some(point));
    }

    #[test]
    fn test_ungeocoded_has_no_point() {
        let location = OrderLocation::ungeocoded("Somewhere", sample_time());
        assert!(location.point.is_none());
    }

    #[test]
    fn test_with_confirmed_keeps_timestamp() {
        let location = OrderLocation::ungeocoded("Somewhere", sample_time());
        let point = GeoPoint::new(48.8566, 2.3522).expect("valid");

        let updated = location.with_confirmed("Paris", point);

        assert_eq!(updated.label, "Paris");
        assert_eq!(updated.point, Some(point));
        assert_eq!(updated.time, location.time);
    }
}
