use crate::core::geo::{Extent, Point};

use rstar::{RTree, RTreeObject, AABB};

/// An item indexed by its extent in map units
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub extent: Extent,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(extent: Extent, data: T) -> Self {
        Self { extent, data }
    }
}

impl<T: PartialEq> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.extent == other.extent && self.data == other.data
    }
}

// --- rstar integration -------------------------------------------------------------------------

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.extent.min.x, self.extent.min.y],
            [self.extent.max.x, self.extent.max.y],
        )
    }
}

/// R-tree over item extents, used to narrow hit tests to nearby candidates
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    /// Builds the tree in one pass, which packs better than repeated inserts
    pub fn bulk_load(items: Vec<SpatialItem<T>>) -> Self {
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    pub fn insert(&mut self, item: SpatialItem<T>) {
        self.rtree.insert(item);
    }

    /// Items whose extent comes within `radius` map units of `center`
    pub fn query_point(&self, center: &Point, radius: f64) -> Vec<&SpatialItem<T>> {
        let envelope = AABB::from_corners(
            [center.x - radius, center.y - radius],
            [center.x + radius, center.y + radius],
        );
        self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .collect()
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
