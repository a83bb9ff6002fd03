use crate::{
    core::geo::LatLng,
    data::spot::{Spot, SpotKey, SpotStore},
    layers::{cluster::MarkerClusterGroup, marker::Marker},
    prelude::{Arc, HashMap},
    spatial::clustering::ClusteringConfig,
    ui::popup::PopupContent,
};

/// Opaque reference to a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(usize);

impl MarkerHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// One mapped spot: created when the spots are loaded, dropped with the page
#[derive(Debug, Clone)]
pub struct MarkerEntry {
    pub key: SpotKey,
    pub spot: Arc<Spot>,
    pub marker: Marker,
    pub display_name: String,
}

impl MarkerEntry {
    pub fn position(&self) -> LatLng {
        self.marker.position()
    }
}

/// Maps every valid spot to exactly one marker and owns marker visibility.
///
/// `show_only` and `show_all` clear the cluster layer and re-add the requested
/// markers, so every filter action costs O(n) in the number of markers. That
/// is the dominant cost of a search and is fine for a region's worth of spots;
/// for large sets, diff the added and removed handles instead.
pub struct MarkerRegistry {
    entries: Vec<MarkerEntry>,
    by_key: HashMap<SpotKey, MarkerHandle>,
    layer: MarkerClusterGroup,
}

impl MarkerRegistry {
    pub fn empty(config: ClusteringConfig) -> Self {
        Self {
            entries: Vec::new(),
            by_key: HashMap::default(),
            layer: MarkerClusterGroup::new("spots".to_string(), config),
        }
    }

    /// Builds one marker per mappable spot and shows them all.
    /// Spots without coordinates are skipped.
    pub fn build(store: &SpotStore, config: ClusteringConfig) -> Self {
        let mut registry = Self::empty(config);

        for (index, spot) in store.spots().iter().enumerate() {
            let Some(position) = spot.position() else {
                log::debug!("spot #{} has no coordinates, not mapped", index);
                continue;
            };

            let key = SpotKey::for_spot(spot, index);
            let display_name = spot.display_name().to_string();
            let marker = Marker::new(key.to_string(), position)
                .with_title(display_name.clone())
                .with_popup(PopupContent::from_spot(spot));

            let handle = MarkerHandle::new(registry.entries.len());
            // first spot wins when ids repeat
            registry.by_key.entry(key.clone()).or_insert(handle);
            registry.entries.push(MarkerEntry {
                key,
                spot: Arc::clone(spot),
                marker,
                display_name,
            });
        }

        registry.show_all();
        log::debug!(
            "marker registry built: {} of {} spots mapped",
            registry.entries.len(),
            store.raw_count()
        );
        registry
    }

    pub fn entries(&self) -> &[MarkerEntry] {
        &self.entries
    }

    /// Entries paired with their handles, in load order
    pub fn iter(&self) -> impl Iterator<Item = (MarkerHandle, &MarkerEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (MarkerHandle::new(i), entry))
    }

    pub fn get(&self, handle: MarkerHandle) -> Option<&MarkerEntry> {
        self.entries.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: MarkerHandle) -> Option<&mut MarkerEntry> {
        self.entries.get_mut(handle.index())
    }

    pub fn find_by_key(&self, key: &SpotKey) -> Option<MarkerHandle> {
        self.by_key.get(key).copied()
    }

    pub fn handles(&self) -> impl Iterator<Item = MarkerHandle> {
        (0..self.entries.len()).map(MarkerHandle::new)
    }

    /// Shows exactly `subset`, hiding everything else
    pub fn show_only(&mut self, subset: &[MarkerHandle]) {
        self.layer.clear_layers();
        let markers: Vec<_> = subset
            .iter()
            .filter_map(|&handle| self.get(handle).map(|entry| (handle, entry.position())))
            .collect();
        self.layer.add_layers(markers);
    }

    /// Shows every marker again
    pub fn show_all(&mut self) {
        self.layer.clear_layers();
        let markers: Vec<_> = self.iter().map(|(h, entry)| (h, entry.position())).collect();
        self.layer.add_layers(markers);
    }

    pub fn is_visible(&self, handle: MarkerHandle) -> bool {
        self.layer.has_layer(handle)
    }

    /// Visible markers, in the order they were added
    pub fn visible(&self) -> &[MarkerHandle] {
        self.layer.handles()
    }

    pub fn visible_count(&self) -> usize {
        self.layer.len()
    }

    pub fn layer(&self) -> &MarkerClusterGroup {
        &self.layer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
