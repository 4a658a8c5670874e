//! Application layer - Use cases and orchestration
//!
//! Contains the location-editing services and the port definitions they
//! drive. Orchestrates the domain state machine around the asynchronous
//! collaborators (geocoding, persistence, the map handle).

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
