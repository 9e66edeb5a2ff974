//! Layout reconstruction module.
//!
//! This module contains:
//! - The detection data model (Detection, Cluster, Partition)
//! - List reconstruction parameters (ClusterParams)
//! - Density-based clustering of detection centroids
//! - Ordering of detections into lists

pub mod assemble;
pub mod clustering;
pub mod detection;
pub mod params;
pub mod spatial;

// Re-export params
pub use params::*;

pub use assemble::{OrderedList, assemble_lists, extract_lists, order_clusters, order_members};
pub use clustering::{DensityClusterer, SpatialClusterer};
pub use detection::{Cluster, Detection, Partition, centroids};
pub use spatial::CentroidIndex;
