//! Location editor service
//!
//! Per-endpoint async façade over the domain state machine. Drives the
//! Viewing/Editing/Saving transitions around the persist call and notifies
//! the presentation layer through the view port. The entity lock is never
//! held across an await.

use std::sync::Arc;

use domain::EditError;
use domain::entities::{GeocodeCandidate, LocationEditor, OrderLocation};
use domain::value_objects::{Endpoint, GeoPoint, SessionId};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{OrderPort, OrderViewPort};

/// Service editing one endpoint of one order
pub struct LocationEditorService {
    order_id: i64,
    endpoint: Endpoint,
    editor: Mutex<LocationEditor>,
    orders: Arc<dyn OrderPort>,
    view: Arc<dyn OrderViewPort>,
}

impl std::fmt::Debug for LocationEditorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationEditorService")
            .field("order_id", &self.order_id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl LocationEditorService {
    /// Create a service showing the given confirmed location
    #[must_use]
    pub fn new(
        order_id: i64,
        endpoint: Endpoint,
        location: OrderLocation,
        orders: Arc<dyn OrderPort>,
        view: Arc<dyn OrderViewPort>,
    ) -> Self {
        Self {
            order_id,
            endpoint,
            editor: Mutex::new(LocationEditor::new(endpoint, location)),
            orders,
            view,
        }
    }

    /// The endpoint this service edits
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The confirmed (authoritative) location
    #[must_use]
    pub fn location(&self) -> OrderLocation {
        self.editor.lock().location().clone()
    }

    /// The point the marker should display right now
    #[must_use]
    pub fn display_point(&self) -> Option<GeoPoint> {
        self.editor.lock().display_point()
    }

    /// Whether a session is open and accepting input
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editor.lock().is_editing()
    }

    /// Whether a persist call is in flight
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.editor.lock().is_saving()
    }

    /// The session's current input text, if a session is open
    #[must_use]
    pub fn input_text(&self) -> Option<String> {
        self.editor.lock().session().map(|s| s.input_text.clone())
    }

    /// Open an edit session
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Viewing.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub fn start_editing(&self) -> Result<SessionId, ApplicationError> {
        let id = self.editor.lock().start_editing()?;
        debug!(session = %id, "Edit session opened");
        self.view.editing_started(self.endpoint);
        Ok(id)
    }

    /// Record a candidate chosen from the search results
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing.
    pub fn select_candidate(&self, candidate: GeocodeCandidate) -> Result<(), ApplicationError> {
        self.editor.lock().select_candidate(candidate)?;
        Ok(())
    }

    /// Update the session's input text
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing.
    pub fn input_changed(&self, text: &str) -> Result<(), ApplicationError> {
        self.editor.lock().set_input_text(text)?;
        Ok(())
    }

    /// Record the optimistic drop position of a drag gesture
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing.
    pub fn drag_begun(&self, point: GeoPoint) -> Result<SessionId, ApplicationError> {
        let id = self.editor.lock().begin_drag(point)?;
        Ok(id)
    }

    /// Apply the reverse-geocode outcome for a drag
    ///
    /// Returns `false` when the session closed or changed in the meantime;
    /// the late result is dropped.
    pub fn drag_reconciled(
        &self,
        session: SessionId,
        point: GeoPoint,
        label: Option<String>,
    ) -> bool {
        self.editor.lock().apply_drag_reconciled(session, point, label)
    }

    /// Persist the pending candidate
    ///
    /// Returns `Ok(false)` without side effects when no candidate is pending.
    /// On success the session closes with the backend's values and the view
    /// is notified. On failure the session reopens intact and the error is
    /// surfaced for a manual retry.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing; the persist error
    /// when the backend call fails.
    #[instrument(skip(self), fields(endpoint = %self.endpoint, order_id = self.order_id))]
    pub async fn confirm(&self) -> Result<bool, ApplicationError> {
        let (label, point) = {
            let mut editor = self.editor.lock();
            match editor.begin_save() {
                Ok(values) => values,
                Err(EditError::NothingSelected) => {
                    debug!("Confirm without a pending candidate, ignoring");
                    return Ok(false);
                },
                Err(err) => return Err(err.into()),
            }
        };

        match self
            .orders
            .update_order_location(self.order_id, self.endpoint, &label, point)
            .await
        {
            Ok(snapshot) => {
                let saved = snapshot.location(self.endpoint).clone();
                self.editor.lock().complete_save(saved)?;
                info!(label = %label, "Location confirmed");
                self.view.location_confirmed(self.endpoint, &label, point);
                self.view.editing_ended(self.endpoint);
                Ok(true)
            },
            Err(err) => {
                warn!(error = %err, "Persisting the location failed, session kept open");
                self.editor.lock().fail_save()?;
                Err(err)
            },
        }
    }

    /// Discard the session, keeping the confirmed values
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub fn cancel(&self) -> Result<(), ApplicationError> {
        self.editor.lock().cancel()?;
        debug!("Edit session cancelled");
        self.view.editing_ended(self.endpoint);
        Ok(())
    }
}
