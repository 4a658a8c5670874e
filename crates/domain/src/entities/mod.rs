//! Domain entities - Objects with identity and lifecycle

mod edit_session;
mod geocode_candidate;
mod location_editor;
mod order_location;

pub use edit_session::EditSession;
pub use geocode_candidate::{AddressParts, GeocodeCandidate};
pub use location_editor::{EditorState, LocationEditor};
pub use order_location::OrderLocation;
