//! Edit session entity

use serde::{Deserialize, Serialize};

use crate::entities::GeocodeCandidate;
use crate::value_objects::{GeoPoint, SessionId};

/// Transient edit state for one endpoint
///
/// Exists only while the endpoint is Editing or Saving. Created on
/// start-editing, destroyed on cancel or successful confirm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditSession {
    /// Identity token for stale-result suppression
    pub id: SessionId,
    /// Current content of the address input field
    pub input_text: String,
    /// Candidate awaiting confirmation, from search or drag reconciliation
    pub pending_candidate: Option<GeocodeCandidate>,
    /// Drag-derived point shown optimistically while reverse geocoding runs
    pub dragged_point: Option<GeoPoint>,
}

impl EditSession {
    /// Open a fresh session seeded with the current label
    #[must_use]
    pub fn new(seed_text: impl Into<String>) -> Self {
        Self {
            id: SessionId::next(),
            input_text: seed_text.into(),
            pending_candidate: None,
            dragged_point: None,
        }
    }

    /// The point the marker should show for this session, if any
    ///
    /// The live dragged point wins over the pending candidate's point.
    #[must_use]
    pub fn display_point(&self) -> Option<GeoPoint> {
        self.dragged_point
            .or_else(|| self.pending_candidate.as_ref().map(|c| c.point))
    }

    /// Whether confirm is currently possible
    #[must_use]
    pub const fn can_confirm(&self) -> bool {
        self.pending_candidate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_seeds_text() {
        let session = EditSession::new("Brussels");
        assert_eq!(session.input_text, "Brussels");
        assert!(session.pending_candidate.is_none());
        assert!(session.dragged_point.is_none());
        assert!(!session.can_confirm());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = EditSession::new("a");
        let b = EditSession::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_point_prefers_dragged() {
        let dragged = GeoPoint::new(48.86, 2.35).expect("valid");
        let selected = GeoPoint::new(50.85, 4.35).expect("valid");

        let mut session = EditSession::new("x");
        assert!(session.display_point().is_none());

        session.pending_candidate = Some(GeocodeCandidate::synthetic(selected, None));
        assert_eq!(session.display_point(), Some(selected));

        session.dragged_point = Some(dragged);
        assert_eq!(session.display_point(), Some(dragged));
    }
}
