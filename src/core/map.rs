use crate::{
    animation::ViewTransition,
    core::{
        config::MapPageConfig,
        constants::{messages, CURRENT_POSITION_POPUP, CURRENT_POSITION_TITLE},
        geo::LatLng,
        viewport::Viewport,
    },
    data::{loader::SpotLoader, spot::SpotStore},
    geolocation::{
        controller::{GeolocationController, GeolocationState, LocateOutcome},
        source::PositionSource,
    },
    layers::{
        manager::LayerManager,
        marker::Marker,
        registry::{MarkerHandle, MarkerRegistry},
        tile::TileLayer,
    },
    search::{FilterResult, SearchEngine, Suggestion},
    ui::{panel::PanelContent, surface::NullSurface, surface::PageSurface},
    Result,
};

/// The spot map page.
///
/// Owns all page state and reports every visible change to its surface.
/// Methods take `&mut self`, so event handlers run one at a time.
pub struct MapPage<S: PageSurface = NullSurface> {
    config: MapPageConfig,
    surface: S,
    store: SpotStore,
    registry: MarkerRegistry,
    search: SearchEngine,
    geolocation: GeolocationController,
    layers: LayerManager,
    viewport: Viewport,
    selection: Option<MarkerHandle>,
    current_position: Option<Marker>,
}

impl<S: PageSurface> MapPage<S> {
    /// Empty page showing the home view over the configured base layer
    pub fn new(config: MapPageConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let home = config.home.bounds();
        let mut viewport = Viewport::new(home.center(), 0.0, config.viewport_size());
        viewport.fit_bounds(&home, Some(config.home.padding));

        let mut layers = LayerManager::with_default_layers();
        layers.set_active(&config.base_layer)?;

        log::debug!(
            "map page created at {} zoom {}",
            viewport.center,
            viewport.zoom
        );

        Ok(Self {
            registry: MarkerRegistry::empty((&config.clustering).into()),
            search: SearchEngine::new(config.search.suggestion_limit),
            geolocation: GeolocationController::new(config.geolocation.clone()),
            store: SpotStore::default(),
            selection: None,
            current_position: None,
            config,
            surface,
            layers,
            viewport,
        })
    }

    /// Fetches the spots and builds the markers.
    ///
    /// On failure the user is alerted, nothing is rendered and the page keeps
    /// whatever it showed before.
    pub async fn load(&mut self, loader: &SpotLoader) -> Result<()> {
        match loader.load().await {
            Ok(store) => {
                self.install(store);
                Ok(())
            }
            Err(err) => {
                log::error!("loading spots from {} failed: {}", loader.location(), err);
                self.surface.alert(messages::LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Replaces the spots and rebuilds the marker registry with every marker shown
    pub fn install(&mut self, store: SpotStore) {
        self.registry = MarkerRegistry::build(&store, (&self.config.clustering).into());
        self.store = store;
        self.selection = None;
        log::info!(
            "{} spots loaded, {} on the map",
            self.store.raw_count(),
            self.registry.len()
        );
        self.surface.markers_changed(self.registry.visible_count());
    }

    /// Live suggestions while the keyword is typed. Markers are untouched.
    pub fn search_input(&mut self, keyword: &str) -> Vec<Suggestion> {
        let suggestions = self.search.suggest(&self.registry, keyword);
        self.surface.show_suggestions(&suggestions);
        suggestions
    }

    /// Shows only the matching markers and focuses the first match.
    /// Without a match the view and the panel stay as they are.
    pub fn apply_search(&mut self, keyword: &str) -> FilterResult {
        let result = self.search.apply(&mut self.registry, keyword);
        self.surface.show_suggestions(&[]);
        self.surface.markers_changed(self.registry.visible_count());

        if let Some(handle) = result.first_match {
            self.focus(handle);
        }
        result
    }

    /// Drops the filter, shows every marker and returns to the home view
    pub fn clear_search(&mut self) {
        self.search.clear(&mut self.registry);
        self.surface.markers_changed(self.registry.visible_count());
        self.surface.show_suggestions(&[]);
        self.clear_selection();

        let transition = self
            .viewport
            .fit_bounds(&self.config.home.bounds(), Some(self.config.home.padding));
        self.surface.view_changed(&transition);
    }

    /// Flies to a marker, zooming in to at least the focus zoom, and selects it
    pub fn focus(&mut self, handle: MarkerHandle) -> Option<ViewTransition> {
        let position = self.registry.get(handle)?.position();
        let zoom = self.viewport.zoom.max(self.config.search.focus_zoom);
        let transition = self.fly_to(position, zoom);
        self.select(handle);
        Some(transition)
    }

    /// Selects a marker: opens its popup and fills the details panel.
    /// Returns `false` for an unknown handle.
    pub fn select(&mut self, handle: MarkerHandle) -> bool {
        if let Some(previous) = self.selection.take() {
            if let Some(entry) = self.registry.get_mut(previous) {
                entry.marker.close_popup();
            }
        }

        let Some(entry) = self.registry.get_mut(handle) else {
            return false;
        };
        entry.marker.open_popup();

        let panel = PanelContent::from_spot(&entry.spot);
        self.surface.open_popup(&entry.marker);
        self.surface.render_panel(&panel);
        self.selection = Some(handle);
        true
    }

    pub fn clear_selection(&mut self) {
        if let Some(handle) = self.selection.take() {
            if let Some(entry) = self.registry.get_mut(handle) {
                entry.marker.close_popup();
            }
        }
        self.surface.clear_panel();
    }

    /// Runs one locate-me sequence and, on a fix, replaces the current
    /// position marker and flies to it
    pub async fn locate(&mut self, source: &dyn PositionSource) -> LocateOutcome {
        let outcome = self.geolocation.locate(source, &mut self.surface).await;

        if let Some(position) = outcome.position() {
            let mut marker = Marker::new("current-position".to_string(), position.coords)
                .with_title(CURRENT_POSITION_TITLE)
                .with_popup(crate::ui::popup::PopupContent::text(CURRENT_POSITION_POPUP));
            marker.open_popup();

            // the previous marker is dropped here
            self.current_position = Some(marker);

            let zoom = self.config.geolocation.locate_zoom;
            self.fly_to(position.coords, zoom);
            if let Some(marker) = &self.current_position {
                self.surface.open_popup(marker);
            }
        }
        outcome
    }

    /// Switches the visible base layer
    pub fn set_base_layer(&mut self, layer_id: &str) -> Result<()> {
        self.layers.set_active(layer_id)
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64) -> ViewTransition {
        let transition = self
            .viewport
            .fly_to(center, zoom, self.config.search.fly_duration());
        self.surface.view_changed(&transition);
        transition
    }

    /// Number of records in `spots.json`, mappable or not
    pub fn spot_count(&self) -> usize {
        self.store.raw_count()
    }

    /// Number of spots with a marker
    pub fn mapped_count(&self) -> usize {
        self.registry.len()
    }

    pub fn config(&self) -> &MapPageConfig {
        &self.config
    }

    pub fn store(&self) -> &SpotStore {
        &self.store
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn base_layer(&self) -> Option<&TileLayer> {
        self.layers.active()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn selection(&self) -> Option<MarkerHandle> {
        self.selection
    }

    pub fn current_position(&self) -> Option<&Marker> {
        self.current_position.as_ref()
    }

    pub fn geolocation_state(&self) -> GeolocationState {
        self.geolocation.state()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tears the page down, handing the surface back to the host
    pub fn teardown(self) -> S {
        log::debug!("map page torn down with {} markers", self.registry.len());
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::LayerTrait;

    fn page() -> MapPage {
        let mut page = MapPage::new(MapPageConfig::default(), NullSurface).unwrap();
        page.install(
            SpotStore::from_json_str(
                r#"[
                    {"spot_id":"a","name":"Cafe","lat":33.5,"lng":133.5},
                    {"spot_id":"b","name":"Cafe Bay","lat":33.6,"lng":133.6},
                    {"spot_id":"c","name":"Park","lat":34.0,"lng":133.0}
                ]"#,
            )
            .unwrap(),
        );
        page
    }

    #[test]
    fn test_new_page_shows_home() {
        let page = MapPage::new(MapPageConfig::default(), NullSurface).unwrap();

        assert_eq!(page.viewport().zoom, 8.0);
        assert!((page.viewport().center.lat - 33.8).abs() < 1e-9);
        assert_eq!(page.base_layer().map(|layer| layer.id()), Some("osm"));
        assert_eq!(page.mapped_count(), 0);
    }

    #[test]
    fn test_unknown_base_layer_is_rejected() {
        let config = MapPageConfig {
            base_layer: "nope".to_string(),
            ..Default::default()
        };
        assert!(MapPage::new(config, NullSurface).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        use crate::core::config::{HomeView, SearchConfig};
        use crate::MapError;

        let no_suggestions = MapPageConfig {
            search: SearchConfig {
                suggestion_limit: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            MapPage::new(no_suggestions, NullSurface),
            Err(MapError::Config(_))
        ));

        let inverted_home = MapPageConfig {
            home: HomeView {
                south_west: (34.6, 134.8),
                north_east: (32.7, 132.0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            MapPage::new(inverted_home, NullSurface),
            Err(MapError::Config(_))
        ));
    }

    #[test]
    fn test_focus_keeps_deeper_zoom() {
        let mut page = page();
        let handle = page.registry().handles().next().unwrap();

        page.focus(handle);
        assert_eq!(page.viewport().zoom, 15.0);

        page.viewport.set_zoom(17.0);
        page.focus(handle);
        assert_eq!(page.viewport().zoom, 17.0);
    }

    #[test]
    fn test_selection_moves_popup() {
        let mut page = page();
        let handles: Vec<_> = page.registry().handles().collect();

        assert!(page.select(handles[0]));
        assert!(page.select(handles[1]));
        assert!(!page.registry().get(handles[0]).unwrap().marker.is_popup_open());
        assert!(page.registry().get(handles[1]).unwrap().marker.is_popup_open());

        page.clear_selection();
        assert_eq!(page.selection(), None);
        assert!(!page.registry().get(handles[1]).unwrap().marker.is_popup_open());
    }
}
