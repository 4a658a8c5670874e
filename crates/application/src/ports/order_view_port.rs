//! Order view notification port
//!
//! Lets the presentation layer react to editing lifecycle events without
//! the services knowing anything about it.

#[cfg(test)]
use mockall::automock;

use domain::value_objects::{Endpoint, GeoPoint};

/// Port for notifying the presentation layer of editing events
#[cfg_attr(test, automock)]
pub trait OrderViewPort: Send + Sync {
    /// An edit session opened on `endpoint`
    fn editing_started(&self, endpoint: Endpoint);

    /// The session on `endpoint` closed, by confirm or cancel
    fn editing_ended(&self, endpoint: Endpoint);

    /// A new location was persisted for `endpoint`
    fn location_confirmed(&self, endpoint: Endpoint, label: &str, point: GeoPoint);
}

/// A view that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOrderView;

impl OrderViewPort for NoopOrderView {
    fn editing_started(&self, _endpoint: Endpoint) {}
    fn editing_ended(&self, _endpoint: Endpoint) {}
    fn location_confirmed(&self, _endpoint: Endpoint, _label: &str, _point: GeoPoint) {}
}
