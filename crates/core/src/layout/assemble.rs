//! List assembly: ordering detections within and across clusters.
//!
//! Within a cluster, members are read top to bottom. Clusters themselves are
//! emitted in reading order of their mean centroid (y first, then x), never
//! by raw label, since labels carry no spatial meaning.

use ordered_float::OrderedFloat;

use crate::error::ClusteringError;
use crate::utils::mean_point;

use super::clustering::SpatialClusterer;
use super::detection::{Cluster, Detection, Partition, centroids};

/// One reconstructed list: texts ordered top to bottom.
pub type OrderedList = Vec<String>;

/// Member indices of `cluster` sorted by ascending centroid y.
///
/// The sort is stable, so members with equal y keep their detection order.
pub fn order_members(detections: &[Detection], cluster: &Cluster) -> Vec<usize> {
    let mut members = cluster.members.clone();
    members.sort_by_key(|&i| OrderedFloat(detections[i].centroid().1));
    members
}

/// Clusters of `partition` in output order: mean centroid y, then mean
/// centroid x, then smallest member index.
pub fn order_clusters<'p>(detections: &[Detection], partition: &'p Partition) -> Vec<&'p Cluster> {
    let mut keyed: Vec<((OrderedFloat<f64>, OrderedFloat<f64>, usize), &Cluster)> = partition
        .clusters()
        .iter()
        .map(|cluster| {
            let (mx, my) = mean_point(cluster.members.iter().map(|&i| detections[i].centroid()))
                .unwrap_or_default();
            let first = cluster.members.iter().copied().min().unwrap_or(usize::MAX);
            ((OrderedFloat(my), OrderedFloat(mx), first), cluster)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, cluster)| cluster).collect()
}

/// Builds one ordered list per cluster, in cluster output order.
pub fn assemble_lists(detections: &[Detection], partition: &Partition) -> Vec<OrderedList> {
    order_clusters(detections, partition)
        .into_iter()
        .map(|cluster| {
            order_members(detections, cluster)
                .into_iter()
                .map(|i| detections[i].text().to_string())
                .collect()
        })
        .collect()
}

/// Clusters the detections and assembles the resulting lists.
pub fn extract_lists<C>(
    detections: &[Detection],
    clusterer: &C,
) -> Result<Vec<OrderedList>, ClusteringError>
where
    C: SpatialClusterer + ?Sized,
{
    let partition = clusterer.partition(&centroids(detections))?;
    Ok(assemble_lists(detections, &partition))
}
