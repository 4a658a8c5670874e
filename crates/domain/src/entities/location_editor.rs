//! Location editor state machine
//!
//! One editor per order endpoint, cycling Viewing → Editing → Saving →
//! Viewing. Transitions are pure and synchronous; the application layer
//! drives them around its async calls (persist, reverse geocode) and relies
//! on the session id to discard results that resolve after the session
//! closed.

use serde::{Deserialize, Serialize};

use crate::entities::{EditSession, GeocodeCandidate, OrderLocation};
use crate::errors::EditError;
use crate::value_objects::{Endpoint, GeoPoint, SessionId};

/// Lifecycle state of a location editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorState {
    /// Showing the confirmed values; no session open
    Viewing,
    /// Session open, accepting input
    Editing(EditSession),
    /// Persist call in flight; no other interaction accepted
    Saving(EditSession),
}

impl EditorState {
    /// Name of the state, for errors and logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Viewing => "Viewing",
            Self::Editing(_) => "Editing",
            Self::Saving(_) => "Saving",
        }
    }
}

/// Per-endpoint editor for an order location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEditor {
    endpoint: Endpoint,
    location: OrderLocation,
    state: EditorState,
}

impl LocationEditor {
    /// Create an editor showing the given confirmed location
    #[must_use]
    pub const fn new(endpoint: Endpoint, location: OrderLocation) -> Self {
        Self {
            endpoint,
            location,
            state: EditorState::Viewing,
        }
    }

    /// The endpoint this editor belongs to
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The confirmed (authoritative) location
    #[must_use]
    pub const fn location(&self) -> &OrderLocation {
        &self.location
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// Whether a session is open and accepting input
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    /// Whether a persist call is in flight
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        matches!(self.state, EditorState::Saving(_))
    }

    /// The open session, in Editing or Saving
    #[must_use]
    pub const fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditorState::Viewing => None,
            EditorState::Editing(session) | EditorState::Saving(session) => Some(session),
        }
    }

    /// Id of the open session, if any
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session().map(|s| s.id)
    }

    /// The point the marker should display right now
    ///
    /// Pure derivation: the session's dragged point, else the pending
    /// candidate's point, else the confirmed point.
    #[must_use]
    pub fn display_point(&self) -> Option<GeoPoint> {
        self.session()
            .and_then(EditSession::display_point)
            .or(self.location.point)
    }

    /// Open an edit session seeded with the current label
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Viewing.
    pub fn start_editing(&mut self) -> Result<SessionId, EditError> {
        match self.state {
            EditorState::Viewing => {
                let session = EditSession::new(self.location.label.clone());
                let id = session.id;
                self.state = EditorState::Editing(session);
                Ok(id)
            },
            _ => Err(EditError::invalid(self.state.name(), "start editing")),
        }
    }

    /// Record a candidate chosen from the search results
    ///
    /// Leaves `input_text` untouched: the text field and the selection are
    /// deliberately decoupled.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing.
    pub fn select_candidate(&mut self, candidate: GeocodeCandidate) -> Result<(), EditError> {
        match &mut self.state {
            EditorState::Editing(session) => {
                session.pending_candidate = Some(candidate);
                Ok(())
            },
            other => Err(EditError::invalid(other.name(), "select a candidate")),
        }
    }

    /// Update the session's input text
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing.
    pub fn set_input_text(&mut self, text: impl Into<String>) -> Result<(), EditError> {
        match &mut self.state {
            EditorState::Editing(session) => {
                session.input_text = text.into();
                Ok(())
            },
            other => Err(EditError::invalid(other.name(), "edit the input")),
        }
    }

    /// Record the optimistic drop position of a drag gesture
    ///
    /// The marker shows this point immediately; the reverse-geocoded label
    /// arrives later through [`Self::apply_drag_reconciled`].
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing (the marker is only
    /// draggable then).
    pub fn begin_drag(&mut self, point: GeoPoint) -> Result<SessionId, EditError> {
        match &mut self.state {
            EditorState::Editing(session) => {
                session.dragged_point = Some(point);
                Ok(session.id)
            },
            other => Err(EditError::invalid(other.name(), "drag the marker")),
        }
    }

    /// Apply the reverse-geocode outcome for a drag
    ///
    /// Sets the pending candidate to a synthetic one carrying `point` and the
    /// resolved label (or the coordinate fallback when `label` is `None`),
    /// and mirrors the label into `input_text`. Returns `false` without any
    /// effect when `session` no longer identifies the open session — a late
    /// result for a cancelled or superseded session is silently dropped.
    pub fn apply_drag_reconciled(
        &mut self,
        session: SessionId,
        point: GeoPoint,
        label: Option<String>,
    ) -> bool {
        let open = match &mut self.state {
            EditorState::Editing(s) | EditorState::Saving(s) => s,
            EditorState::Viewing => return false,
        };
        if open.id != session {
            return false;
        }
        let candidate = GeocodeCandidate::synthetic(point, label);
        open.input_text = candidate.display_label.clone();
        open.pending_candidate = Some(candidate);
        true
    }

    /// Move to Saving and yield the values to persist
    ///
    /// Returns `(label, point)` where the label is the session's input text —
    /// which may differ from the candidate's canonical label if the user
    /// edited it after selecting.
    ///
    /// # Errors
    ///
    /// `NothingSelected` when no candidate is pending (callers treat this as
    /// a no-op); `InvalidTransition` unless the editor is Editing.
    pub fn begin_save(&mut self) -> Result<(String, GeoPoint), EditError> {
        match &self.state {
            EditorState::Editing(session) => {
                let Some(candidate) = &session.pending_candidate else {
                    return Err(EditError::NothingSelected);
                };
                let label = session.input_text.clone();
                let point = candidate.point;
                let session = session.clone();
                self.state = EditorState::Saving(session);
                Ok((label, point))
            },
            other => Err(EditError::invalid(other.name(), "confirm")),
        }
    }

    /// Close the session with the persisted values
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Saving.
    pub fn complete_save(&mut self, saved: OrderLocation) -> Result<(), EditError> {
        match self.state {
            EditorState::Saving(_) => {
                self.location = saved;
                self.state = EditorState::Viewing;
                Ok(())
            },
            _ => Err(EditError::invalid(self.state.name(), "complete the save")),
        }
    }

    /// Return to Editing after a failed persist, session intact
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Saving.
    pub fn fail_save(&mut self) -> Result<(), EditError> {
        match std::mem::replace(&mut self.state, EditorState::Viewing) {
            EditorState::Saving(session) => {
                self.state = EditorState::Editing(session);
                Ok(())
            },
            other => {
                let name = other.name();
                self.state = other;
                Err(EditError::invalid(name, "fail the save"))
            },
        }
    }

    /// Discard the session, keeping the original values
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the editor is Editing (cancel is disabled
    /// while a persist call is in flight).
    pub fn cancel(&mut self) -> Result<(), EditError> {
        match self.state {
            EditorState::Editing(_) => {
                self.state = EditorState::Viewing;
                Ok(())
            },
            _ => Err(EditError::invalid(self.state.name(), "cancel")),
        }
    }
}
