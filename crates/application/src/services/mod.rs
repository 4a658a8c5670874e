//! Application services
//!
//! Business logic orchestration for location editing and map sync.

pub mod address_search;
pub mod location_editor;
pub mod marker_sync;
pub mod order_planning;
pub mod viewport;

pub use address_search::{AddressSearch, SearchConfig};
pub use location_editor::LocationEditorService;
pub use marker_sync::{MarkerState, MarkerSync};
pub use order_planning::OrderPlanning;
pub use viewport::{ViewportConfig, ViewportController, ViewportRequest, plan};
