//! Radius queries over a fixed set of centroids.

use geo_index::rtree::sort::HilbertSort;
use geo_index::rtree::{RTree, RTreeBuilder, RTreeIndex};

use crate::utils::{Point, distance_sq};

/// Bulk-loaded spatial index over centroids.
///
/// Ids are stable (id == position in the slice the index was built from).
pub struct CentroidIndex<'a> {
    points: &'a [Point],
    tree: Option<RTree<f64>>,
}

impl<'a> CentroidIndex<'a> {
    /// Builds a static R-tree over the points.
    pub fn new(points: &'a [Point]) -> Self {
        if points.is_empty() {
            return Self { points, tree: None };
        }
        let mut builder: RTreeBuilder<f64> = RTreeBuilder::new(points.len() as u32);
        for &(x, y) in points {
            builder.add(x, y, x, y);
        }
        Self {
            points,
            tree: Some(builder.finish::<HilbertSort>()),
        }
    }

    /// Ids of all points within `radius` (inclusive) of point `id`,
    /// including `id` itself, in ascending order.
    pub fn within(&self, id: usize, radius: f64) -> Vec<usize> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let center = self.points[id];
        let (x, y) = center;
        let limit = radius * radius;
        // Box edges are rounded sums, so widen them by a few ulps to keep
        // every point the distance test accepts. The distance test trims the
        // extra reach along with the corners.
        let slack = (x.abs().max(y.abs()) + radius) * 4.0 * f64::EPSILON;
        let reach = radius + slack;
        let mut hits: Vec<usize> = tree
            .search(x - reach, y - reach, x + reach, y + reach)
            .into_iter()
            .map(|i| i as usize)
            .filter(|&i| distance_sq(center, self.points[i]) <= limit)
            .collect();
        hits.sort_unstable();
        hits
    }
}
