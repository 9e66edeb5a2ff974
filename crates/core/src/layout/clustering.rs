//! Density-based clustering of detection centroids.
//!
//! Contains the SpatialClusterer seam and DensityClusterer, a DBSCAN
//! configured with a minimum occupancy of one: every point is a core point,
//! so clusters are exactly the connected components of the graph linking
//! centroids at most `eps` apart, and no point is ever discarded as noise.

use tracing::debug;

use crate::error::ClusteringError;
use crate::utils::Point;

use super::detection::Partition;
use super::params::ClusterParams;
use super::spatial::CentroidIndex;

/// Partitions centroids into clusters.
///
/// Implementations must return a partition that covers every input index
/// exactly once, and whose membership does not depend on input order.
pub trait SpatialClusterer: Send + Sync {
    fn partition(&self, centroids: &[Point]) -> Result<Partition, ClusteringError>;
}

/// Chained-proximity clustering with radius `eps`.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityClusterer {
    eps: f64,
}

impl Default for DensityClusterer {
    fn default() -> Self {
        Self::from_params(&ClusterParams::default())
    }
}

impl DensityClusterer {
    /// Creates a clusterer with the given radius in pixels.
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }

    pub fn from_params(params: &ClusterParams) -> Self {
        Self::new(params.eps)
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }
}

impl SpatialClusterer for DensityClusterer {
    fn partition(&self, centroids: &[Point]) -> Result<Partition, ClusteringError> {
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ClusteringError::InvalidEps(self.eps));
        }
        if let Some((index, &(x, y))) = centroids
            .iter()
            .enumerate()
            .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
        {
            return Err(ClusteringError::NonFiniteCentroid { index, x, y });
        }

        let index = CentroidIndex::new(centroids);
        let mut forest = DisjointSet::new(centroids.len());
        for i in 0..centroids.len() {
            for j in index.within(i, self.eps) {
                if j > i {
                    forest.union(i, j);
                }
            }
        }

        // Roots are the smallest member of each component, so labels follow
        // first appearance and never depend on traversal order.
        let labels: Vec<usize> = (0..centroids.len()).map(|i| forest.find(i)).collect();
        let partition = Partition::from_labels(&labels);
        debug!(
            points = centroids.len(),
            clusters = partition.cluster_count(),
            eps = self.eps,
            "clustered centroids"
        );
        Ok(partition)
    }
}

/// Union-find keyed by index. The smaller root always wins a union.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra < rb {
            self.parent[rb] = ra;
        } else if rb < ra {
            self.parent[ra] = rb;
        }
    }
}
