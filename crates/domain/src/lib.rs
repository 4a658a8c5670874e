//! Domain layer for the Hive location-editing core
//!
//! Contains the value objects, entities, and the per-endpoint editor state
//! machine. This layer is synchronous and has no I/O; the application layer
//! drives it through ports.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::EditError;
pub use value_objects::*;
