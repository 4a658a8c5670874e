//! Application port implementations
//!
//! Adapts the dispatch client to the ports the application layer consumes,
//! mapping the transport error taxonomy into application errors.

use application::ApplicationError;
use application::ports::{GeocodeHit, GeocodingPort, OrderPort, OrderSnapshot};
use async_trait::async_trait;
use domain::value_objects::{Endpoint, GeoPoint};

use crate::client::{DispatchClient, HttpDispatchClient};
use crate::error::DispatchError;

impl From<DispatchError> for ApplicationError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Validation(msg) => Self::Validation(msg),
            other => Self::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for HttpDispatchClient {
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeocodeHit>, ApplicationError> {
        Ok(self.search_addresses(query, limit).await?)
    }

    async fn reverse_geocode(
        &self,
        point: GeoPoint,
        limit: u8,
    ) -> Result<Vec<GeocodeHit>, ApplicationError> {
        Ok(self.resolve_point(point, limit).await?)
    }
}

#[async_trait]
impl OrderPort for HttpDispatchClient {
    async fn update_order_location(
        &self,
        order_id: i64,
        endpoint: Endpoint,
        label: &str,
        point: GeoPoint,
    ) -> Result<OrderSnapshot, ApplicationError> {
        Ok(self
            .patch_order_location(order_id, endpoint, label, point)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_stay_validation() {
        let err = ApplicationError::from(DispatchError::Validation("forbidden".to_string()));
        assert!(matches!(err, ApplicationError::Validation(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn transport_errors_become_network() {
        let err = ApplicationError::from(DispatchError::Timeout { timeout_secs: 10 });
        assert!(matches!(err, ApplicationError::Network(_)));
        assert!(err.is_retryable());

        let err = ApplicationError::from(DispatchError::ParseError("bad json".to_string()));
        assert!(matches!(err, ApplicationError::Network(_)));
    }
}
