//! Order persistence port

use async_trait::async_trait;
use domain::entities::OrderLocation;
use domain::value_objects::{Endpoint, GeoPoint};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// The authoritative order state as persisted by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Backend order id
    pub id: i64,
    pub pickup: OrderLocation,
    pub dropoff: OrderLocation,
}

impl OrderSnapshot {
    /// The location for one endpoint
    #[must_use]
    pub const fn location(&self, endpoint: Endpoint) -> &OrderLocation {
        match endpoint {
            Endpoint::Pickup => &self.pickup,
            Endpoint::Dropoff => &self.dropoff,
        }
    }
}

/// Port for persisting order location changes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderPort: Send + Sync {
    /// Persist a new label and point for one endpoint of an order
    ///
    /// Returns the full order as the backend now sees it.
    async fn update_order_location(
        &self,
        order_id: i64,
        endpoint: Endpoint,
        label: &str,
        point: GeoPoint,
    ) -> Result<OrderSnapshot, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn location_selects_by_endpoint() {
        let time = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let snapshot = OrderSnapshot {
            id: 42,
            pickup: OrderLocation::ungeocoded("Warehouse 4", time),
            dropoff: OrderLocation::ungeocoded("Customer", time),
        };

        assert_eq!(snapshot.location(Endpoint::Pickup).label, "Warehouse 4");
        assert_eq!(snapshot.location(Endpoint::Dropoff).label, "Customer");
    }
}
