//! Value Objects - Immutable, identity-less domain primitives

mod endpoint;
mod geo_point;
mod session_id;

pub use endpoint::Endpoint;
pub use geo_point::{BoundingBox, GeoPoint, InvalidCoordinates};
pub use session_id::SessionId;
