//! Geocode candidate entity

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// Structured address components of a geocode hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
}

impl AddressParts {
    /// True when no component is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postcode.is_none()
            && self.street.is_none()
            && self.house_number.is_none()
    }
}

/// A resolved address with coordinates
///
/// Produced by the geocoding collaborator. The one local construction is
/// [`GeocodeCandidate::synthetic`], which carries a drag-derived point whose
/// label came from reverse geocoding (or the coordinate fallback).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Label shown in the autocomplete list and input field
    pub display_label: String,
    /// Resolved coordinates
    pub point: GeoPoint,
    /// Structured address, when the geocoder provides one
    pub address_parts: Option<AddressParts>,
}

impl GeocodeCandidate {
    /// Candidate for a drag-derived point
    ///
    /// `label` is the reverse-geocoded label when one resolved; otherwise the
    /// coordinate fallback (`"{lat:.5}, {lng:.5}"`) stands in.
    #[must_use]
    pub fn synthetic(point: GeoPoint, label: Option<String>) -> Self {
        Self {
            display_label: label.unwrap_or_else(|| point.to_string()),
            point,
            address_parts: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_with_resolved_label() {
        let point = GeoPoint::new(48.8566, 2.3522).expect("valid");
        let candidate =
            GeocodeCandidate::synthetic(point, Some("Paris, Île-de-France, France".to_string()));

        assert_eq!(candidate.display_label, "Paris, Île-de-France, France");
        assert_eq!(candidate.point, point);
        assert!(candidate.address_parts.is_none());
    }

    #[test]
    fn test_synthetic_falls_back_to_coordinates() {
        let point = GeoPoint::new(48.8566, 2.3522).expect("valid");
        let candidate = GeocodeCandidate::synthetic(point, None);

        assert_eq!(candidate.display_label, "48.85660, 2.35220");
        assert_eq!(candidate.point, point);
    }

    #[test]
    fn test_address_parts_is_empty() {
        assert!(AddressParts::default().is_empty());

        let parts = AddressParts {
            city: Some("Brussels".to_string()),
            ..AddressParts::default()
        };
        assert!(!parts.is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let candidate = GeocodeCandidate {
            display_label: "Brussels, Brussels, Belgium".to_string(),
            point: GeoPoint::new(50.8503, 4.3517).expect("valid"),
            address_parts: Some(AddressParts {
                country: Some("Belgium".to_string()),
                city: Some("Brussels".to_string()),
                ..AddressParts::default()
            }),
        };

        let json = serde_json::to_string(&candidate).expect("serialize");
        let back: GeocodeCandidate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(candidate, back);
    }
}
