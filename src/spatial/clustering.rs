use crate::core::{geo::LatLng, geo::Point, viewport::Viewport};
use crate::prelude::HashMap;
use crate::spatial::index::SpatialItem;

/// A group of nearby markers drawn as one bubble
#[derive(Debug, Clone)]
pub struct Cluster<T> {
    /// Unique identifier for the cluster
    pub id: String,
    /// Mean position of the members
    pub center: LatLng,
    /// Items in this cluster
    pub items: Vec<SpatialItem<T>>,
    /// Zoom level at which this cluster was created
    pub zoom_level: f64,
}

impl<T> Cluster<T> {
    pub fn new(id: String, items: Vec<SpatialItem<T>>, zoom_level: f64) -> Self {
        let center = Self::mean_position(&items);
        Self {
            id,
            center,
            items,
            zoom_level,
        }
    }

    fn mean_position(items: &[SpatialItem<T>]) -> LatLng {
        if items.is_empty() {
            return LatLng::default();
        }
        let n = items.len() as f64;
        let (lat, lng) = items.iter().fold((0.0, 0.0), |(lat, lng), item| {
            (lat + item.position.lat, lng + item.position.lng)
        });
        LatLng::new(lat / n, lng / n)
    }

    /// Get the number of items in the cluster
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Check if this is a single-item cluster
    pub fn is_single(&self) -> bool {
        self.items.len() == 1
    }
}

/// Configuration for clustering
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringConfig {
    /// Zoom level from which every marker is shown on its own
    pub disable_clustering_at_zoom: f64,
    /// Maximum number of items in a single cluster
    pub max_cluster_size: usize,
    /// Grid cell size for clustering (in pixels)
    pub grid_size: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            disable_clustering_at_zoom: 17.0,
            max_cluster_size: 100,
            grid_size: 80.0,
        }
    }
}

/// Grid-based marker clustering in projected pixel space
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    config: ClusteringConfig,
}

impl Clustering {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ClusteringConfig) {
        self.config = config;
    }

    /// Groups `items` into clusters for the viewport's zoom.
    ///
    /// Items are bucketed by the grid cell of their world pixel position, so the
    /// result is stable while panning at a fixed zoom. Clusters come back in a
    /// deterministic order (by grid cell, then chunk).
    pub fn cluster<T: Clone>(
        &self,
        items: Vec<SpatialItem<T>>,
        viewport: &Viewport,
    ) -> Vec<Cluster<T>> {
        let zoom = viewport.zoom;

        if zoom >= self.config.disable_clustering_at_zoom {
            return items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Cluster::new(format!("single_{i}"), vec![item], zoom))
                .collect();
        }

        let grid_size = self.config.grid_size.max(1.0);
        let mut grid: HashMap<(i64, i64), Vec<SpatialItem<T>>> = HashMap::default();
        for item in items {
            let pixel: Point = viewport.project(&item.position, None);
            let cell = (
                (pixel.x / grid_size).floor() as i64,
                (pixel.y / grid_size).floor() as i64,
            );
            grid.entry(cell).or_default().push(item);
        }

        let mut cells: Vec<_> = grid.into_iter().collect();
        cells.sort_by_key(|(cell, _)| *cell);

        let chunk_size = self.config.max_cluster_size.max(1);
        let mut clusters = Vec::with_capacity(cells.len());
        for ((grid_x, grid_y), cell_items) in cells {
            if cell_items.len() <= chunk_size {
                clusters.push(Cluster::new(
                    format!("cluster_{grid_x}_{grid_y}"),
                    cell_items,
                    zoom,
                ));
            } else {
                // Too many items - split into multiple clusters
                for (i, chunk) in cell_items.chunks(chunk_size).enumerate() {
                    clusters.push(Cluster::new(
                        format!("cluster_{grid_x}_{grid_y}__{i}"),
                        chunk.to_vec(),
                        zoom,
                    ));
                }
            }
        }

        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<SpatialItem<usize>> {
        vec![
            SpatialItem::new("a".to_string(), LatLng::new(33.5, 133.5), 0),
            SpatialItem::new("b".to_string(), LatLng::new(33.5001, 133.5001), 1),
            SpatialItem::new("c".to_string(), LatLng::new(34.0, 133.0), 2),
        ]
    }

    #[test]
    fn test_nearby_markers_merge_at_low_zoom() {
        let viewport = Viewport::new(LatLng::new(33.8, 133.4), 8.0, Point::new(800.0, 600.0));
        let clusters = Clustering::default().cluster(items(), &viewport);

        assert_eq!(clusters.len(), 2);
        let total: usize = clusters.iter().map(|c| c.count()).sum();
        assert_eq!(total, 3);
        assert!(clusters.iter().any(|c| c.count() == 2));
    }

    #[test]
    fn test_clustering_disabled_at_high_zoom() {
        let viewport = Viewport::new(LatLng::new(33.5, 133.5), 17.0, Point::new(800.0, 600.0));
        let clusters = Clustering::default().cluster(items(), &viewport);

        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.is_single()));
    }

    #[test]
    fn test_oversized_cells_are_split() {
        let config = ClusteringConfig {
            max_cluster_size: 1,
            ..ClusteringConfig::default()
        };
        let viewport = Viewport::new(LatLng::new(33.8, 133.4), 8.0, Point::new(800.0, 600.0));
        let clusters = Clustering::new(config).cluster(items(), &viewport);

        assert_eq!(clusters.len(), 3);
    }
}
