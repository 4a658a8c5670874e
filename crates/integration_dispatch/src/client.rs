//! Dispatch backend HTTP client
//!
//! Talks to the dispatch API for forward/reverse geocoding and order
//! location updates. Forward-geocode results are cached briefly; reverse
//! lookups and updates always hit the backend.

use std::time::Duration;

use application::ports::{GeocodeHit, OrderSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::OrderLocation;
use domain::value_objects::{Endpoint, GeoPoint};
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::DispatchConfig;
use crate::error::DispatchError;

/// Trait for dispatch backend clients
#[async_trait]
pub trait DispatchClient: Send + Sync {
    /// Resolve a free-text query into address hits
    async fn search_addresses(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeHit>, DispatchError>;

    /// Resolve coordinates into the nearest address hits
    async fn resolve_point(
        &self,
        point: GeoPoint,
        limit: u8,
    ) -> Result<Vec<GeocodeHit>, DispatchError>;

    /// Persist a new label and point for one endpoint of an order
    async fn patch_order_location(
        &self,
        order_id: i64,
        endpoint: Endpoint,
        label: &str,
        point: GeoPoint,
    ) -> Result<OrderSnapshot, DispatchError>;

    /// Check if the dispatch backend is reachable
    async fn is_healthy(&self) -> bool;
}

/// HTTP client for the dispatch API
#[derive(Debug)]
pub struct HttpDispatchClient {
    client: Client,
    config: DispatchConfig,
    geocode_cache: Option<Cache<(String, u8), Vec<GeocodeHit>>>,
}

impl HttpDispatchClient {
    /// Create a new dispatch client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DispatchConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Hive/1.0")
            .build()
            .map_err(|e| DispatchError::ConnectionFailed(e.to_string()))?;

        let geocode_cache = (config.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            geocode_cache,
        })
    }

    fn map_send_error(&self, e: &reqwest::Error) -> DispatchError {
        if e.is_timeout() {
            DispatchError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            DispatchError::ConnectionFailed(e.to_string())
        }
    }

    /// Read the response body, turning HTTP errors into the crate taxonomy
    async fn read_body(response: reqwest::Response) -> Result<String, DispatchError> {
        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body
            };
            return Err(DispatchError::Validation(detail));
        }
        if !status.is_success() {
            return Err(DispatchError::RequestFailed(format!("HTTP {status}")));
        }
        response
            .text()
            .await
            .map_err(|e| DispatchError::ParseError(e.to_string()))
    }

    /// Parse the raw JSON geocode response into hits
    fn parse_geocode_response(body: &str) -> Result<Vec<GeocodeHit>, DispatchError> {
        let raw: Vec<RawGeocodeItem> =
            serde_json::from_str(body).map_err(|e| DispatchError::ParseError(e.to_string()))?;
        Ok(raw.into_iter().map(RawGeocodeItem::into_hit).collect())
    }

    /// Parse the raw JSON order response into a snapshot
    fn parse_order_response(body: &str) -> Result<OrderSnapshot, DispatchError> {
        let raw: RawOrder =
            serde_json::from_str(body).map_err(|e| DispatchError::ParseError(e.to_string()))?;
        Ok(raw.into_snapshot())
    }

    async fn fetch_geocode(&self, query: &str, limit: u8) -> Result<Vec<GeocodeHit>, DispatchError> {
        let url = format!("{}/routing/geocode", self.config.base_url);
        let params = [("q", query.to_string()), ("limit", limit.to_string())];

        debug!(?url, query, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let body = Self::read_body(response).await?;
        Self::parse_geocode_response(&body)
    }
}

#[async_trait]
impl DispatchClient for HttpDispatchClient {
    #[instrument(skip(self))]
    async fn search_addresses(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeHit>, DispatchError> {
        let Some(cache) = &self.geocode_cache else {
            return self.fetch_geocode(query, limit).await;
        };

        let key = (query.to_string(), limit);
        if let Some(hits) = cache.get(&key).await {
            debug!(query, "Geocode cache hit");
            return Ok(hits);
        }

        let hits = self.fetch_geocode(query, limit).await?;
        cache.insert(key, hits.clone()).await;
        Ok(hits)
    }

    #[instrument(skip(self), fields(point = %point))]
    async fn resolve_point(
        &self,
        point: GeoPoint,
        limit: u8,
    ) -> Result<Vec<GeocodeHit>, DispatchError> {
        let url = format!("{}/routing/reverse-geocode", self.config.base_url);
        let params = [
            ("lat", point.lat().to_string()),
            ("lng", point.lng().to_string()),
            ("limit", limit.to_string()),
        ];

        debug!(?url, "Reverse geocoding point");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let body = Self::read_body(response).await?;
        Self::parse_geocode_response(&body)
    }

    #[instrument(skip(self, label), fields(endpoint = %endpoint))]
    async fn patch_order_location(
        &self,
        order_id: i64,
        endpoint: Endpoint,
        label: &str,
        point: GeoPoint,
    ) -> Result<OrderSnapshot, DispatchError> {
        let url = format!("{}/order/{order_id}", self.config.base_url);
        let body = match endpoint {
            Endpoint::Pickup => serde_json::json!({
                "pickupPoint": label,
                "pickupLat": point.lat(),
                "pickupLng": point.lng(),
            }),
            Endpoint::Dropoff => serde_json::json!({
                "dropoffPoint": label,
                "dropoffLat": point.lat(),
                "dropoffLng": point.lng(),
            }),
        };

        debug!(?url, "Updating order location");

        let response = self
            .client
            .patch(&url)
            .query(&[("organizationId", &self.config.organization_id)])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let body = Self::read_body(response).await?;
        Self::parse_order_response(&body)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/routing/geocode?q=test&limit=1", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawGeocodeItem {
    name: String,
    lat: f64,
    lng: f64,
    country: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    street: Option<String>,
    housenumber: Option<String>,
}

impl RawGeocodeItem {
    fn into_hit(self) -> GeocodeHit {
        GeocodeHit {
            name: self.name,
            lat: self.lat,
            lng: self.lng,
            country: self.country,
            city: self.city,
            state: self.state,
            postcode: self.postcode,
            street: self.street,
            house_number: self.housenumber,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrder {
    id: i64,
    pickup_point: String,
    pickup_lat: Option<f64>,
    pickup_lng: Option<f64>,
    pickup_time: Option<DateTime<Utc>>,
    dropoff_point: String,
    dropoff_lat: Option<f64>,
    dropoff_lng: Option<f64>,
    dropoff_time: Option<DateTime<Utc>>,
}

impl RawOrder {
    fn into_snapshot(self) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id,
            pickup: convert_location(
                self.pickup_point,
                self.pickup_time,
                self.pickup_lat,
                self.pickup_lng,
            ),
            dropoff: convert_location(
                self.dropoff_point,
                self.dropoff_time,
                self.dropoff_lat,
                self.dropoff_lng,
            ),
        }
    }
}

fn convert_location(
    label: String,
    time: Option<DateTime<Utc>>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> OrderLocation {
    let time = time.unwrap_or_else(Utc::now);
    match (lat, lng) {
        (Some(lat), Some(lng)) => match GeoPoint::new(lat, lng) {
            Ok(point) => OrderLocation::new(label, time, point),
            Err(_) => OrderLocation::ungeocoded(label, time),
        },
        _ => OrderLocation::ungeocoded(label, time),
    }
}
