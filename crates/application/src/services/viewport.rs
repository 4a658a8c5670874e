//! Map viewport policy
//!
//! Keeps the camera framed around whichever endpoint coordinates are
//! currently known. The policy is a pure function; the controller turns its
//! outcome into fire-and-forget camera commands, last write wins.

use std::sync::Arc;

use domain::value_objects::{BoundingBox, GeoPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::ports::MapViewportPort;

/// What the camera should frame, derived and never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportRequest {
    /// Frame both endpoints
    Bounds(BoundingBox),
    /// Center the single known endpoint
    Center(GeoPoint),
}

/// Decide the framing for the given known points
#[must_use]
pub fn plan(pickup: Option<GeoPoint>, dropoff: Option<GeoPoint>) -> Option<ViewportRequest> {
    match (pickup, dropoff) {
        (Some(a), Some(b)) => Some(ViewportRequest::Bounds(BoundingBox::around(a, b))),
        (Some(point), None) | (None, Some(point)) => Some(ViewportRequest::Center(point)),
        (None, None) => None,
    }
}

/// Camera animation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Pixel padding around fitted bounds
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Animation duration for every camera move
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Zoom when centering a single known endpoint
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: f64,
    /// Closer zoom when an edit session opens on a point
    #[serde(default = "default_edit_zoom")]
    pub edit_zoom: f64,
}

const fn default_padding() -> u32 {
    80
}

const fn default_animation_ms() -> u64 {
    1000
}

const fn default_focus_zoom() -> f64 {
    13.0
}

const fn default_edit_zoom() -> f64 {
    15.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            animation_ms: default_animation_ms(),
            focus_zoom: default_focus_zoom(),
            edit_zoom: default_edit_zoom(),
        }
    }
}

/// Issues camera commands according to the framing policy
pub struct ViewportController {
    map: Arc<dyn MapViewportPort>,
    config: ViewportConfig,
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ViewportController {
    /// Create a controller over the given map handle
    #[must_use]
    pub fn new(map: Arc<dyn MapViewportPort>, config: ViewportConfig) -> Self {
        Self { map, config }
    }

    /// Re-evaluate the policy and move the camera accordingly
    ///
    /// With no known point the camera stays where it is.
    #[instrument(skip(self))]
    pub fn refresh(&self, pickup: Option<GeoPoint>, dropoff: Option<GeoPoint>) {
        match plan(pickup, dropoff) {
            Some(ViewportRequest::Bounds(bounds)) => {
                self.map
                    .fit_bounds(bounds, self.config.padding, self.config.animation_ms);
            },
            Some(ViewportRequest::Center(point)) => {
                self.map
                    .fly_to(point, self.config.focus_zoom, self.config.animation_ms);
            },
            None => debug!("No known point, leaving the camera in place"),
        }
    }

    /// Zoom in on a point when an edit session opens on it
    #[instrument(skip(self))]
    pub fn focus_editing(&self, point: GeoPoint) {
        self.map
            .fly_to(point, self.config.edit_zoom, self.config.animation_ms);
    }
}
