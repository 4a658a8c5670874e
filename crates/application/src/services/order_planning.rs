//! Order planning coordinator
//!
//! Wires the per-endpoint editing stack (editor, marker sync, autocomplete)
//! together with the shared viewport controller for one order's detail view.
//! The two endpoints are fully independent; nothing here serializes them.

use std::sync::Arc;

use domain::entities::GeocodeCandidate;
use domain::value_objects::{Endpoint, GeoPoint};
use tracing::instrument;

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, MapViewportPort, OrderPort, OrderSnapshot, OrderViewPort};
use crate::services::{
    AddressSearch, LocationEditorService, MarkerState, MarkerSync, SearchConfig,
    ViewportConfig, ViewportController,
};

struct EndpointControls {
    editor: Arc<LocationEditorService>,
    marker: MarkerSync,
    search: AddressSearch,
}

impl EndpointControls {
    fn new(
        order_id: i64,
        endpoint: Endpoint,
        snapshot: &OrderSnapshot,
        geocoder: &Arc<dyn GeocodingPort>,
        orders: &Arc<dyn OrderPort>,
        view: &Arc<dyn OrderViewPort>,
        search_config: SearchConfig,
    ) -> Self {
        let editor = Arc::new(LocationEditorService::new(
            order_id,
            endpoint,
            snapshot.location(endpoint).clone(),
            Arc::clone(orders),
            Arc::clone(view),
        ));
        Self {
            marker: MarkerSync::new(Arc::clone(&editor), Arc::clone(geocoder)),
            search: AddressSearch::new(Arc::clone(geocoder), search_config),
            editor,
        }
    }
}

/// Coordinates location editing for one order's detail view
pub struct OrderPlanning {
    pickup: EndpointControls,
    dropoff: EndpointControls,
    viewport: ViewportController,
}

impl std::fmt::Debug for OrderPlanning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderPlanning").finish_non_exhaustive()
    }
}

impl OrderPlanning {
    /// Assemble the coordinator for an order
    #[must_use]
    pub fn new(
        snapshot: &OrderSnapshot,
        geocoder: Arc<dyn GeocodingPort>,
        orders: Arc<dyn OrderPort>,
        map: Arc<dyn MapViewportPort>,
        view: Arc<dyn OrderViewPort>,
        search_config: SearchConfig,
        viewport_config: ViewportConfig,
    ) -> Self {
        Self {
            pickup: EndpointControls::new(
                snapshot.id,
                Endpoint::Pickup,
                snapshot,
                &geocoder,
                &orders,
                &view,
                search_config.clone(),
            ),
            dropoff: EndpointControls::new(
                snapshot.id,
                Endpoint::Dropoff,
                snapshot,
                &geocoder,
                &orders,
                &view,
                search_config,
            ),
            viewport: ViewportController::new(map, viewport_config),
        }
    }

    const fn controls(&self, endpoint: Endpoint) -> &EndpointControls {
        match endpoint {
            Endpoint::Pickup => &self.pickup,
            Endpoint::Dropoff => &self.dropoff,
        }
    }

    /// Open an edit session on `endpoint`
    ///
    /// When the endpoint already has a known point the camera zooms in on
    /// it, pre-empting the default framing.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when the endpoint is not Viewing.
    #[instrument(skip(self))]
    pub fn start_editing(&self, endpoint: Endpoint) -> Result<(), ApplicationError> {
        let controls = self.controls(endpoint);
        controls.editor.start_editing()?;
        if let Some(point) = controls.editor.display_point() {
            self.viewport.focus_editing(point);
        }
        Ok(())
    }

    /// Feed a keystroke to `endpoint`'s session and its autocomplete
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when no session is open; the autocomplete is not
    /// touched in that case.
    pub fn search_input(&self, endpoint: Endpoint, text: &str) -> Result<(), ApplicationError> {
        let controls = self.controls(endpoint);
        controls.editor.input_changed(text)?;
        controls.search.input_changed(text);
        Ok(())
    }

    /// The current autocomplete options for `endpoint`
    #[must_use]
    pub fn options(&self, endpoint: Endpoint) -> Vec<GeocodeCandidate> {
        self.controls(endpoint).search.options()
    }

    /// Pick an autocomplete option by its exact display label
    ///
    /// The chosen label replaces the session's input text, then the
    /// candidate is recorded, so a later confirm persists the option's
    /// label rather than the partial query. Returns `Ok(false)` when the
    /// label no longer matches an option; the stale selection is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when no session is open.
    #[instrument(skip(self))]
    pub fn select(&self, endpoint: Endpoint, label: &str) -> Result<bool, ApplicationError> {
        let controls = self.controls(endpoint);
        let Some(candidate) = controls.search.select(label) else {
            return Ok(false);
        };
        controls.editor.input_changed(label)?;
        controls.editor.select_candidate(candidate)?;
        Ok(true)
    }

    /// Handle a completed marker drag on `endpoint`
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when the marker was not draggable.
    pub async fn drag_ended(
        &self,
        endpoint: Endpoint,
        point: GeoPoint,
    ) -> Result<(), ApplicationError> {
        self.controls(endpoint).marker.drag_ended(point).await
    }

    /// Persist `endpoint`'s pending candidate, then reframe the camera
    ///
    /// Returns `Ok(false)` for the no-candidate no-op. The camera is only
    /// reframed after a successful save; a failed persist leaves both the
    /// session and the viewport untouched.
    ///
    /// # Errors
    ///
    /// Persist errors are surfaced for a manual retry.
    #[instrument(skip(self))]
    pub async fn confirm(&self, endpoint: Endpoint) -> Result<bool, ApplicationError> {
        let controls = self.controls(endpoint);
        let confirmed = controls.editor.confirm().await?;
        if confirmed {
            controls.search.clear();
            self.sync_viewport();
        }
        Ok(confirmed)
    }

    /// Discard `endpoint`'s session and reframe the camera
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when no session is open.
    #[instrument(skip(self))]
    pub fn cancel(&self, endpoint: Endpoint) -> Result<(), ApplicationError> {
        let controls = self.controls(endpoint);
        controls.editor.cancel()?;
        controls.search.clear();
        self.sync_viewport();
        Ok(())
    }

    /// Re-run the framing policy from the current display points
    pub fn sync_viewport(&self) {
        self.viewport.refresh(
            self.pickup.editor.display_point(),
            self.dropoff.editor.display_point(),
        );
    }

    /// Both marker states, pickup first
    #[must_use]
    pub fn markers(&self) -> (MarkerState, MarkerState) {
        (self.pickup.marker.marker(), self.dropoff.marker.marker())
    }

    /// The editor service for one endpoint
    #[must_use]
    pub fn editor(&self, endpoint: Endpoint) -> &Arc<LocationEditorService> {
        &self.controls(endpoint).editor
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use domain::entities::OrderLocation;
    use domain::value_objects::BoundingBox;
    use parking_lot::Mutex;

    use super::*;
    use crate::ports::{GeocodeHit, NoopOrderView};

    fn brussels() -> GeoPoint {
        GeoPoint::new(50.85, 4.35).expect("valid")
    }

    fn paris() -> GeoPoint {
        GeoPoint::new(48.86, 2.35).expect("valid")
    }

    fn snapshot_with_both_points() -> OrderSnapshot {
        let time = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        OrderSnapshot {
            id: 42,
            pickup: OrderLocation::new("Warehouse 4", time, brussels()),
            dropoff: OrderLocation::new("Customer", time, paris()),
        }
    }

    fn snapshot_with_unknown_dropoff() -> OrderSnapshot {
        let time = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        OrderSnapshot {
            id: 42,
            pickup: OrderLocation::new("Warehouse 4", time, brussels()),
            dropoff: OrderLocation::ungeocoded("Customer", time),
        }
    }

    struct StubGeocoder {
        hits: Vec<GeocodeHit>,
    }

    #[async_trait]
    impl GeocodingPort for StubGeocoder {
        async fn geocode(
            &self,
            _query: &str,
            _limit: u8,
        ) -> Result<Vec<GeocodeHit>, ApplicationError> {
            Ok(self.hits.clone())
        }

        async fn reverse_geocode(
            &self,
            _point: GeoPoint,
            _limit: u8,
        ) -> Result<Vec<GeocodeHit>, ApplicationError> {
            Ok(Vec::new())
        }
    }

    struct EchoOrders;

    #[async_trait]
    impl OrderPort for EchoOrders {
        async fn update_order_location(
            &self,
            order_id: i64,
            endpoint: Endpoint,
            label: &str,
            point: GeoPoint,
        ) -> Result<OrderSnapshot, ApplicationError> {
            let time = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
            let updated = OrderLocation::new(label, time, point);
            let mut snapshot = snapshot_with_both_points();
            snapshot.id = order_id;
            match endpoint {
                Endpoint::Pickup => snapshot.pickup = updated,
                Endpoint::Dropoff => snapshot.dropoff = updated,
            }
            Ok(snapshot)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum MapCommand {
        FitBounds(BoundingBox),
        FlyTo(GeoPoint, f64),
    }

    #[derive(Default)]
    struct RecordingMap {
        commands: Mutex<Vec<MapCommand>>,
    }

    impl RecordingMap {
        fn commands(&self) -> Vec<MapCommand> {
            self.commands.lock().clone()
        }
    }

    impl MapViewportPort for RecordingMap {
        fn fit_bounds(&self, bounds: BoundingBox, _padding: u32, _duration_ms: u64) {
            self.commands.lock().push(MapCommand::FitBounds(bounds));
        }

        fn fly_to(&self, point: GeoPoint, zoom: f64, _duration_ms: u64) {
            self.commands.lock().push(MapCommand::FlyTo(point, zoom));
        }
    }

    fn brussels_hit() -> GeocodeHit {
        GeocodeHit {
            name: "Brussels".to_string(),
            lat: 50.8503,
            lng: 4.3517,
            country: Some("Belgium".to_string()),
            city: Some("Brussels".to_string()),
            state: None,
            postcode: None,
            street: None,
            house_number: None,
        }
    }

    fn planning(snapshot: &OrderSnapshot, map: Arc<RecordingMap>) -> OrderPlanning {
        OrderPlanning::new(
            snapshot,
            Arc::new(StubGeocoder {
                hits: vec![brussels_hit()],
            }),
            Arc::new(EchoOrders),
            map,
            Arc::new(NoopOrderView),
            SearchConfig::for_testing(),
            ViewportConfig::default(),
        )
    }

    #[tokio::test]
    async fn sync_viewport_frames_both_known_points() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map.clone());

        planning.sync_viewport();

        assert_eq!(
            map.commands(),
            vec![MapCommand::FitBounds(BoundingBox::around(
                brussels(),
                paris()
            ))]
        );
    }

    #[tokio::test]
    async fn start_editing_zooms_in_even_with_the_other_point_unknown() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_unknown_dropoff(), map.clone());

        planning.start_editing(Endpoint::Pickup).unwrap();

        // Edit zoom, not the single-point focus zoom.
        assert_eq!(map.commands(), vec![MapCommand::FlyTo(brussels(), 15.0)]);
    }

    #[tokio::test]
    async fn start_editing_without_a_point_moves_nothing() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_unknown_dropoff(), map.clone());

        planning.start_editing(Endpoint::Dropoff).unwrap();

        assert!(map.commands().is_empty());
        assert!(planning.editor(Endpoint::Dropoff).is_editing());
    }

    #[tokio::test]
    async fn search_select_confirm_flow_updates_location_and_viewport() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map.clone());

        planning.start_editing(Endpoint::Pickup).unwrap();
        planning.search_input(Endpoint::Pickup, "Bruxel").unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;

        let options = planning.options(Endpoint::Pickup);
        assert_eq!(options.len(), 1);

        let selected = planning
            .select(Endpoint::Pickup, "Brussels, Brussels, Belgium")
            .unwrap();
        assert!(selected);

        let confirmed = planning.confirm(Endpoint::Pickup).await.unwrap();
        assert!(confirmed);

        let pickup = planning.editor(Endpoint::Pickup).location();
        assert_eq!(pickup.label, "Brussels, Brussels, Belgium");
        // Fly-to from start_editing, then the post-confirm reframe.
        assert_eq!(map.commands().len(), 2);
        assert!(matches!(map.commands()[1], MapCommand::FitBounds(_)));
    }

    #[tokio::test]
    async fn select_replaces_the_partial_query_with_the_option_label() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map);

        planning.start_editing(Endpoint::Pickup).unwrap();
        planning.search_input(Endpoint::Pickup, "Bruxel").unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;

        planning
            .select(Endpoint::Pickup, "Brussels, Brussels, Belgium")
            .unwrap();

        assert_eq!(
            planning.editor(Endpoint::Pickup).input_text().as_deref(),
            Some("Brussels, Brussels, Belgium")
        );
    }

    #[tokio::test]
    async fn select_with_stale_label_is_ignored() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map);

        planning.start_editing(Endpoint::Pickup).unwrap();

        let selected = planning.select(Endpoint::Pickup, "Gone Place").unwrap();

        assert!(!selected);
        let confirmed = planning.confirm(Endpoint::Pickup).await.unwrap();
        assert!(!confirmed);
    }

    #[tokio::test]
    async fn confirm_without_candidate_leaves_the_viewport_alone() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map.clone());

        planning.start_editing(Endpoint::Pickup).unwrap();
        let before = map.commands().len();

        let confirmed = planning.confirm(Endpoint::Pickup).await.unwrap();

        assert!(!confirmed);
        assert_eq!(map.commands().len(), before);
        assert!(planning.editor(Endpoint::Pickup).is_editing());
    }

    #[tokio::test]
    async fn cancel_reframes_from_the_confirmed_points() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map.clone());

        planning.start_editing(Endpoint::Pickup).unwrap();
        planning
            .drag_ended(Endpoint::Pickup, GeoPoint::new(45.0, 5.0).unwrap())
            .await
            .unwrap();
        planning.cancel(Endpoint::Pickup).unwrap();

        let last = map.commands().last().cloned().unwrap();
        assert_eq!(
            last,
            MapCommand::FitBounds(BoundingBox::around(brussels(), paris()))
        );
        let (pickup_marker, _) = planning.markers();
        assert_eq!(pickup_marker.position, Some(brussels()));
        assert!(!pickup_marker.draggable);
    }

    #[tokio::test]
    async fn endpoints_edit_independently() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map);

        planning.start_editing(Endpoint::Pickup).unwrap();
        planning.start_editing(Endpoint::Dropoff).unwrap();

        assert!(planning.editor(Endpoint::Pickup).is_editing());
        assert!(planning.editor(Endpoint::Dropoff).is_editing());

        planning.cancel(Endpoint::Pickup).unwrap();
        assert!(!planning.editor(Endpoint::Pickup).is_editing());
        assert!(planning.editor(Endpoint::Dropoff).is_editing());
    }

    #[tokio::test]
    async fn markers_reflect_editing_state_per_endpoint() {
        let map = Arc::new(RecordingMap::default());
        let planning = planning(&snapshot_with_both_points(), map);

        planning.start_editing(Endpoint::Dropoff).unwrap();

        let (pickup_marker, dropoff_marker) = planning.markers();
        assert!(!pickup_marker.pulsing);
        assert!(dropoff_marker.pulsing);
        assert!(dropoff_marker.draggable);
    }
}
