//! Recognized tokens and the clusters built from them.

use rustc_hash::FxHashMap;

use crate::utils::{Point, Quad, midpoint, quad_from_rect};

/// One recognized text token.
///
/// Produced by a [`TokenSource`](crate::recognize::TokenSource) and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    quad: Quad,
    text: String,
    confidence: Option<f64>,
}

impl Detection {
    /// Creates a detection from its bounding quadrilateral, ordered
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn new(quad: Quad, text: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            quad,
            text: text.into(),
            confidence,
        }
    }

    /// Creates a detection from an axis-aligned box (x0, y0) - (x1, y1).
    pub fn from_rect(
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        text: impl Into<String>,
        confidence: Option<f64>,
    ) -> Self {
        Self::new(quad_from_rect((x0, y0, x1, y1)), text, confidence)
    }

    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    /// Midpoint of the top-left and bottom-right corners.
    pub fn centroid(&self) -> Point {
        midpoint(self.quad[0], self.quad[2])
    }

}

/// Centroids of a detection sequence, in the same order.
pub fn centroids(detections: &[Detection]) -> Vec<Point> {
    detections.iter().map(Detection::centroid).collect()
}

/// A maximal group of detections forming one vertical list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Unique within one image. Not a spatial ordering key.
    pub label: usize,
    /// Detection indices, ascending, never empty.
    pub members: Vec<usize>,
}

/// Clusters computed for one image.
///
/// Every detection index `0..len` belongs to exactly one cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<Cluster>,
    len: usize,
}

impl Partition {
    /// Builds a partition from one label per detection. Labels need not be
    /// contiguous; clusters are emitted in order of their smallest member.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut clusters: Vec<Cluster> = Vec::new();
        let mut slot: FxHashMap<usize, usize> = FxHashMap::default();
        for (index, &label) in labels.iter().enumerate() {
            let at = *slot.entry(label).or_insert_with(|| {
                clusters.push(Cluster {
                    label,
                    members: Vec::new(),
                });
                clusters.len() - 1
            });
            clusters[at].members.push(index);
        }
        Self {
            clusters,
            len: labels.len(),
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Number of partitioned detections.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Label of every detection, indexed by detection.
    pub fn labels(&self) -> Vec<usize> {
        let mut labels = vec![0; self.len];
        for cluster in &self.clusters {
            for &m in &cluster.members {
                labels[m] = cluster.label;
            }
        }
        labels
    }

    /// Membership sets with labels erased, sorted. Two partitions of the
    /// same detections are equivalent iff their canonical forms are equal.
    pub fn canonical(&self) -> Vec<Vec<usize>> {
        let mut sets: Vec<Vec<usize>> = self.clusters.iter().map(|c| c.members.clone()).collect();
        sets.sort();
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_uses_diagonal_corners() {
        let det = Detection::new(
            [(10.0, 20.0), (50.0, 22.0), (52.0, 40.0), (8.0, 38.0)],
            "word",
            Some(0.9),
        );
        assert_eq!(det.centroid(), (31.0, 30.0));
        assert_eq!(det.quad()[3], (8.0, 38.0));
    }

    #[test]
    fn test_from_rect_keeps_text_and_confidence() {
        let det = Detection::from_rect(0.0, 0.0, 20.0, 10.0, "", None);
        assert_eq!(det.text(), "");
        assert_eq!(det.confidence(), None);
        assert_eq!(det.centroid(), (10.0, 5.0));
    }

    #[test]
    fn test_partition_from_labels() {
        let p = Partition::from_labels(&[7, 3, 7, 9]);
        assert_eq!(p.cluster_count(), 3);
        assert_eq!(p.clusters()[0].label, 7);
        assert_eq!(p.clusters()[0].members, vec![0, 2]);
        assert_eq!(p.labels(), vec![7, 3, 7, 9]);
        assert_eq!(p.canonical(), vec![vec![0, 2], vec![1], vec![3]]);
    }

    #[test]
    fn test_empty_partition() {
        let p = Partition::from_labels(&[]);
        assert!(p.is_empty());
        assert_eq!(p.cluster_count(), 0);
    }
}
