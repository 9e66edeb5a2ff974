//! High-level API module for word-list extraction.
//!
//! # Example
//!
//! ```ignore
//! use listscan_core::api::{ExtractOptions, process_folder};
//! use listscan_core::recognize::SidecarSource;
//!
//! let engine = SidecarSource::default();
//! let report = process_folder(&engine, "scans/", &ExtractOptions::default())?;
//! println!("{}", report.summary());
//! ```

pub mod high_level;
pub mod report;

// Re-export for convenience
pub use high_level::{
    ExtractOptions, Mode, discover_images, extract_image_lists, process_folder,
    process_folder_with, process_image, recognize_image,
};
pub use report::{BatchReport, FileOutcome, ImageOutcome};
