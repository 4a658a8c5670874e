//! Order endpoint discriminator

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two geolocated endpoints of a delivery order
///
/// Not a network endpoint: the pickup or dropoff location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Where the goods are collected
    Pickup,
    /// Where the goods are delivered
    Dropoff,
}

impl Endpoint {
    /// Lowercase label used in events and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }

    /// The opposite endpoint
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Pickup => Self::Dropoff,
            Self::Dropoff => Self::Pickup,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
