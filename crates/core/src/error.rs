//! Error types for listscan.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for list extraction.
///
/// Every variant except `NotADirectory` and `InvalidParams` is local to one
/// image: the batch driver records it and moves on to the next file.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("cannot read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("recognition failed: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("clustering failed: {0}")]
    Clustering(#[from] ClusteringError),

    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failure of a recognition engine to produce detections for one image.
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("engine initialization failed: {0}")]
    Init(String),

    #[error("engine failed: {0}")]
    Engine(String),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("no detections found at {}", .0.display())]
    MissingDetections(PathBuf),

    #[error("malformed detections in {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

/// Malformed clustering input. These are contract violations, never produced
/// for well-formed (including empty) input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusteringError {
    #[error("centroid {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCentroid { index: usize, x: f64, y: f64 },

    #[error("eps must be finite and non-negative, got {0}")]
    InvalidEps(f64),
}

/// Convenience Result type alias for ListError.
pub type Result<T> = std::result::Result<T, ListError>;
