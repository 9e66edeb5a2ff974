//! listscan - reconstructs stacked word lists from scanned pages.
//!
//! A recognition engine turns each page into positioned text tokens; the
//! layout module clusters token centroids into lists and orders every list
//! top to bottom.

pub mod api;
pub mod error;
pub mod layout;
pub mod output;
pub mod preprocess;
pub mod recognize;
pub mod utils;

pub use api::high_level;
pub use error::{ClusteringError, ListError, RecognitionError, Result};
