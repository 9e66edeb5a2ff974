//! Layout analysis parameters.
//!
//! Contains ClusterParams for controlling how detections are grouped into lists.

use crate::error::{ListError, Result};

/// Default neighbourhood radius in pixels.
pub const DEFAULT_EPS: f64 = 50.0;

/// Parameters for list reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    /// Two detections whose centroids are at most this many pixels apart
    /// are directly connected. Clusters are the transitive closure of that
    /// relation.
    pub eps: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self { eps: DEFAULT_EPS }
    }
}

impl ClusterParams {
    /// Creates parameters with the given radius.
    ///
    /// Returns an error if eps is negative, NaN, or infinite.
    pub fn new(eps: f64) -> Result<Self> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(ListError::InvalidParams(format!(
                "eps should be a finite, non-negative number of pixels, got {eps}"
            )));
        }
        Ok(Self { eps })
    }
}
