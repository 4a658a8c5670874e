//! Map viewport port
//!
//! The map handle is a fire-and-forget sink: camera moves carry no result
//! and never fail from the caller's point of view.

#[cfg(test)]
use mockall::automock;

use domain::value_objects::{BoundingBox, GeoPoint};

/// Port for driving the map camera
#[cfg_attr(test, automock)]
pub trait MapViewportPort: Send + Sync {
    /// Animate the camera so `bounds` is fully visible
    fn fit_bounds(&self, bounds: BoundingBox, padding: u32, duration_ms: u64);

    /// Animate the camera to center on `point` at the given zoom
    fn fly_to(&self, point: GeoPoint, zoom: f64, duration_ms: u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MapViewportPort>();
    }
}
