use crate::core::geo::{LatLng, LatLngBounds};

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A point item that can be indexed via an R-tree (x = lng, y = lat)
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub id: String,
    pub position: LatLng,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(id: String, position: LatLng, data: T) -> Self {
        Self { id, position, data }
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for SpatialItem<T> {}

// --- rstar integration -------------------------------------------------------------------------

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.lng, self.position.lat])
    }
}

impl<T> PointDistance for SpatialItem<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.lng - point[0];
        let dy = self.position.lat - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree over marker positions
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    /// Bulk-loads an index, faster than repeated inserts
    pub fn bulk_load(items: Vec<SpatialItem<T>>) -> Self {
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    pub fn insert(&mut self, item: SpatialItem<T>) {
        self.rtree.insert(item);
    }

    /// Items inside the bounds, edges included
    pub fn query(&self, bounds: &LatLngBounds) -> Vec<&SpatialItem<T>> {
        let envelope = AABB::from_corners(
            [bounds.south_west.lng, bounds.south_west.lat],
            [bounds.north_east.lng, bounds.north_east.lat],
        );
        self.rtree.locate_in_envelope_intersecting(&envelope).collect()
    }

    pub fn nearest(&self, position: &LatLng) -> Option<&SpatialItem<T>> {
        self.rtree.nearest_neighbor(&[position.lng, position.lat])
    }

    pub fn all_items(&self) -> Vec<&SpatialItem<T>> {
        self.rtree.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn clear(&mut self) {
        self.rtree = RTree::new();
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
