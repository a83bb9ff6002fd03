use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        registry::MarkerHandle,
    },
    prelude::HashSet,
    spatial::{
        clustering::{Cluster, Clustering, ClusteringConfig},
        index::{SpatialIndex, SpatialItem},
    },
};

/// The layer that actually shows spot markers, grouped into clusters.
///
/// It only tracks which markers are on the map; the markers themselves stay
/// in the registry. There is no incremental update: callers clear the layer
/// and add the new set.
pub struct MarkerClusterGroup {
    properties: LayerProperties,
    members: Vec<MarkerHandle>,
    member_set: HashSet<MarkerHandle>,
    index: SpatialIndex<MarkerHandle>,
    clustering: Clustering,
}

impl MarkerClusterGroup {
    pub fn new(id: String, config: ClusteringConfig) -> Self {
        Self {
            properties: LayerProperties::new(id, "Spots".to_string(), LayerType::MarkerCluster)
                .with_z_index(10),
            members: Vec::new(),
            member_set: HashSet::default(),
            index: SpatialIndex::new(),
            clustering: Clustering::new(config),
        }
    }

    /// Removes every marker from the layer
    pub fn clear_layers(&mut self) {
        self.members.clear();
        self.member_set.clear();
        self.index.clear();
    }

    /// Adds markers in order; handles already on the layer are skipped
    pub fn add_layers<I>(&mut self, markers: I)
    where
        I: IntoIterator<Item = (MarkerHandle, LatLng)>,
    {
        for (handle, position) in markers {
            if self.member_set.insert(handle) {
                self.members.push(handle);
                self.index
                    .insert(SpatialItem::new(handle.to_string(), position, handle));
            }
        }
    }

    pub fn has_layer(&self, handle: MarkerHandle) -> bool {
        self.member_set.contains(&handle)
    }

    /// Markers on the layer, in insertion order
    pub fn handles(&self) -> &[MarkerHandle] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn set_clustering(&mut self, config: ClusteringConfig) {
        self.clustering.set_config(config);
    }

    /// Clusters of the markers inside the viewport
    pub fn clusters(&self, viewport: &Viewport) -> Vec<Cluster<MarkerHandle>> {
        let items: Vec<_> = self
            .index
            .query(&viewport.bounds())
            .into_iter()
            .cloned()
            .collect();
        self.clustering.cluster(items, viewport)
    }
}

impl LayerTrait for MarkerClusterGroup {
    crate::impl_layer_trait!(MarkerClusterGroup, properties);

    fn options(&self) -> serde_json::Value {
        let config = self.clustering.config();
        serde_json::json!({
            "markers": self.members.len(),
            "grid_size": config.grid_size,
            "disable_clustering_at_zoom": config.disable_clustering_at_zoom,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.index.all_items().into_iter().map(|item| item.position))
    }
}
