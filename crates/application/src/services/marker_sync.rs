//! Marker synchronization
//!
//! Derives the map marker for one endpoint from the editor state and
//! reconciles drag gestures with the reverse geocoder. The drop position is
//! applied synchronously; the resolved label arrives later and only ever
//! updates the text, never the point.

use std::sync::Arc;

use domain::value_objects::GeoPoint;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{GeocodeHit, GeocodingPort};
use crate::services::LocationEditorService;

/// What the map should render for one endpoint's marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerState {
    /// Where the marker sits, `None` for a never-geocoded endpoint
    pub position: Option<GeoPoint>,
    /// Whether the marker accepts drag gestures
    pub draggable: bool,
    /// Whether the marker renders its editing highlight
    pub pulsing: bool,
}

/// Keeps one endpoint's marker consistent with its editor
pub struct MarkerSync {
    editor: Arc<LocationEditorService>,
    geocoder: Arc<dyn GeocodingPort>,
}

impl std::fmt::Debug for MarkerSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerSync")
            .field("endpoint", &self.editor.endpoint())
            .finish_non_exhaustive()
    }
}

impl MarkerSync {
    /// Create a marker sync for the given editor
    #[must_use]
    pub fn new(editor: Arc<LocationEditorService>, geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self { editor, geocoder }
    }

    /// The marker as it should render right now
    ///
    /// Pure derivation from the editor state: no caching, so closing the
    /// session immediately snaps the marker back to the confirmed point.
    #[must_use]
    pub fn marker(&self) -> MarkerState {
        let editing = self.editor.is_editing();
        MarkerState {
            position: self.editor.display_point(),
            draggable: editing,
            pulsing: editing,
        }
    }

    /// Handle a completed drag gesture
    ///
    /// Records the drop position before the first await, then resolves a
    /// label through the reverse geocoder. An empty or failed lookup falls
    /// back to the coordinate label; a session that closed in the meantime
    /// drops the late result entirely.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when the marker was not draggable (no open
    /// session).
    #[instrument(skip(self), fields(endpoint = %self.editor.endpoint()))]
    pub async fn drag_ended(&self, point: GeoPoint) -> Result<(), ApplicationError> {
        let session = self.editor.drag_begun(point)?;

        let label = match self.geocoder.reverse_geocode(point, 1).await {
            Ok(hits) => hits
                .first()
                .map(GeocodeHit::display_label)
                .filter(|label| !label.is_empty()),
            Err(err) => {
                debug!(error = %err, "Reverse geocode failed, using coordinate label");
                None
            },
        };

        if !self.editor.drag_reconciled(session, point, label) {
            debug!(session = %session, "Session closed during reverse geocode, result dropped");
        }
        Ok(())
    }
}
