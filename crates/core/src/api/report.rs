//! Per-file outcomes of a batch run.

use std::path::{Path, PathBuf};

use crate::error::ListError;

/// What one successfully processed image produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    pub image: PathBuf,
    /// Number of recognized tokens.
    pub detections: usize,
    /// Number of reconstructed lists (0 in plain mode).
    pub lists: usize,
    /// Files written for this image.
    pub outputs: Vec<PathBuf>,
}

/// Result of processing one file in a batch.
#[derive(Debug)]
pub enum FileOutcome {
    Succeeded(ImageOutcome),
    Failed { image: PathBuf, error: ListError },
}

impl FileOutcome {
    pub fn image(&self) -> &Path {
        match self {
            FileOutcome::Succeeded(outcome) => &outcome.image,
            FileOutcome::Failed { image, .. } => image,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Succeeded(_))
    }
}

/// Outcomes of a batch, in file-name order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Succeeded(outcome) => Some(outcome),
            FileOutcome::Failed { .. } => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&Path, &ListError)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed { image, error } => Some((image.as_path(), error)),
            FileOutcome::Succeeded(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// One-line summary, e.g. `3 images: 2 succeeded, 1 failed`.
    pub fn summary(&self) -> String {
        let ok = self.outcomes.iter().filter(|o| o.is_success()).count();
        format!(
            "{} images: {} succeeded, {} failed",
            self.len(),
            ok,
            self.len() - ok
        )
    }
}
