//! Dispatch backend integration
//!
//! HTTP adapter for the dispatch API: forward and reverse geocoding plus
//! order location updates.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`DispatchClient`] defines the
//! backend operations, implemented by [`HttpDispatchClient`], which also
//! implements the application's `GeocodingPort` and `OrderPort` so it can be
//! handed straight to the services.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_dispatch::{DispatchConfig, HttpDispatchClient};
//!
//! let config = DispatchConfig::default();
//! let client = HttpDispatchClient::new(&config)?;
//!
//! let hits = client.search_addresses("Bruxel", 5).await?;
//! ```

mod adapters;
mod client;
mod config;
mod error;

pub use client::{DispatchClient, HttpDispatchClient};
pub use config::DispatchConfig;
pub use error::DispatchError;
