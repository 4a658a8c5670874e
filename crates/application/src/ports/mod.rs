//! Ports (interfaces) for external collaborators
//!
//! Following hexagonal architecture, these traits define what the
//! application needs from the outside world. Implementations live in
//! the integration crates and the presentation layer.

pub mod geocoding_port;
pub mod map_port;
pub mod order_port;
pub mod order_view_port;

pub use geocoding_port::{GeocodeHit, GeocodingPort};
pub use map_port::MapViewportPort;
pub use order_port::{OrderPort, OrderSnapshot};
pub use order_view_port::{NoopOrderView, OrderViewPort};

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use map_port::MockMapViewportPort;
#[cfg(test)]
pub use order_port::MockOrderPort;
#[cfg(test)]
pub use order_view_port::MockOrderViewPort;
