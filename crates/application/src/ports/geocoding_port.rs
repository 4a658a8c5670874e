//! Geocoding service port
//!
//! Defines the interface for forward and reverse geocoding. Adapters in the
//! integration layer implement this port against the dispatch backend.

use async_trait::async_trait;
use domain::entities::{AddressParts, GeocodeCandidate};
use domain::value_objects::GeoPoint;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A raw hit returned by the geocoding collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    /// Place or street name
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
}

impl GeocodeHit {
    /// The label shown for this hit: comma-join of name, city, and country,
    /// skipping absent parts
    #[must_use]
    pub fn display_label(&self) -> String {
        [
            Some(self.name.as_str()),
            self.city.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Project the hit into a domain candidate
    ///
    /// Returns `None` when the collaborator handed back coordinates outside
    /// the valid range; such hits are dropped rather than partially applied.
    #[must_use]
    pub fn candidate(&self) -> Option<GeocodeCandidate> {
        let point = GeoPoint::new(self.lat, self.lng).ok()?;
        let parts = AddressParts {
            country: self.country.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postcode: self.postcode.clone(),
            street: self.street.clone(),
            house_number: self.house_number.clone(),
        };
        Some(GeocodeCandidate {
            display_label: self.display_label(),
            point,
            address_parts: (!parts.is_empty()).then_some(parts),
        })
    }
}

/// Port for the geocoding collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text query into geocode hits
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeocodeHit>, ApplicationError>;

    /// Resolve coordinates into the nearest known hits
    ///
    /// An empty list is a valid, non-error outcome.
    async fn reverse_geocode(
        &self,
        point: GeoPoint,
        limit: u8,
    ) -> Result<Vec<GeocodeHit>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brussels_hit() -> GeocodeHit {
        GeocodeHit {
            name: "Brussels".to_string(),
            lat: 50.8503,
            lng: 4.3517,
            country: Some("Belgium".to_string()),
            city: Some("Brussels".to_string()),
            state: None,
            postcode: Some("1000".to_string()),
            street: None,
            house_number: None,
        }
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }

    #[test]
    fn display_label_joins_present_parts() {
        assert_eq!(brussels_hit().display_label(), "Brussels, Brussels, Belgium");
    }

    #[test]
    fn display_label_skips_absent_parts() {
        let hit = GeocodeHit {
            city: None,
            country: None,
            ..brussels_hit()
        };
        assert_eq!(hit.display_label(), "Brussels");
    }

    #[test]
    fn display_label_skips_empty_parts() {
        let hit = GeocodeHit {
            city: Some(String::new()),
            ..brussels_hit()
        };
        assert_eq!(hit.display_label(), "Brussels, Belgium");
    }

    #[test]
    fn candidate_carries_point_and_parts() {
        let candidate = brussels_hit().candidate().expect("valid hit");
        assert_eq!(candidate.display_label, "Brussels, Brussels, Belgium");
        assert!((candidate.point.lat() - 50.8503).abs() < f64::EPSILON);
        let parts = candidate.address_parts.expect("parts");
        assert_eq!(parts.postcode.as_deref(), Some("1000"));
    }

    #[test]
    fn candidate_drops_invalid_coordinates() {
        let hit = GeocodeHit {
            lat: 123.0,
            ..brussels_hit()
        };
        assert!(hit.candidate().is_none());
    }

    #[test]
    fn candidate_without_parts_has_none() {
        let hit = GeocodeHit {
            name: "Somewhere".to_string(),
            lat: 1.0,
            lng: 2.0,
            country: None,
            city: None,
            state: None,
            postcode: None,
            street: None,
            house_number: None,
        };
        let candidate = hit.candidate().expect("valid");
        assert!(candidate.address_parts.is_none());
    }
}
