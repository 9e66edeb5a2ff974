//! High-level list extraction API.
//!
//! Provides the main public API for turning scanned pages into word lists:
//! - `extract_image_lists()` - Recognize, cluster and order one image
//! - `process_image()` - Same, then write the result files
//! - `process_folder()` - Batch over every supported image in a directory

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::error::{ListError, Result};
use crate::layout::{
    ClusterParams, DensityClusterer, Detection, OrderedList, SpatialClusterer, extract_lists,
};
use crate::output::{OutputPaths, write_file, write_lists, write_plain, write_raw};
use crate::preprocess::prepare;
use crate::recognize::{PageImage, TokenSource};

use super::report::{BatchReport, FileOutcome, ImageOutcome};

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// What to produce for each image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Raw dump plus one cleaned line per reconstructed list.
    #[default]
    Lists,
    /// All recognized lines in one file, no spatial grouping.
    Plain,
}

impl Mode {
    /// Lower-case file extensions accepted in this mode.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Mode::Lists => &["png", "jpg", "jpeg"],
            Mode::Plain => &["png", "jpg", "jpeg", "bmp", "tiff"],
        }
    }

    /// Whether pages are binarized before recognition unless told otherwise.
    /// Plain mode hands the engine the page as loaded.
    pub fn preprocess_by_default(self) -> bool {
        matches!(self, Mode::Lists)
    }

    /// Whether `path` has an accepted extension, ignoring case.
    pub fn accepts(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }
}

/// Options for list extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Clustering parameters.
    pub params: ClusterParams,

    /// Output mode.
    pub mode: Mode,

    /// Binarize pages before recognition. Defaults per mode, see
    /// [`Mode::preprocess_by_default`].
    pub preprocess: bool,

    /// Where result files go. None writes beside each image.
    pub output_dir: Option<PathBuf>,

    /// Worker threads for a batch. None uses available parallelism.
    pub threads: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::for_mode(Mode::Lists)
    }
}

impl ExtractOptions {
    /// Default options for `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            params: ClusterParams::default(),
            mode,
            preprocess: mode.preprocess_by_default(),
            output_dir: None,
            threads: None,
        }
    }
}

/// Loads, preprocesses and recognizes one image.
pub fn recognize_image<S>(engine: &S, path: &Path, preprocess: bool) -> Result<Vec<Detection>>
where
    S: TokenSource + ?Sized,
{
    let pixels = prepare(path, preprocess)?;
    let page = PageImage {
        path,
        pixels: &pixels,
    };
    Ok(engine.recognize(&page)?)
}

/// Recognizes one image and reconstructs its lists.
///
/// Returns the detections in engine order alongside the ordered lists.
pub fn extract_image_lists<S, C>(
    engine: &S,
    clusterer: &C,
    path: &Path,
    preprocess: bool,
) -> Result<(Vec<Detection>, Vec<OrderedList>)>
where
    S: TokenSource + ?Sized,
    C: SpatialClusterer + ?Sized,
{
    let detections = recognize_image(engine, path, preprocess)?;
    let lists = extract_lists(&detections, clusterer)?;
    Ok((detections, lists))
}

/// Processes one image end to end and writes its result files.
///
/// Nothing is written unless recognition and clustering both succeed.
pub fn process_image<S, C>(
    engine: &S,
    clusterer: &C,
    path: &Path,
    options: &ExtractOptions,
) -> Result<ImageOutcome>
where
    S: TokenSource + ?Sized,
    C: SpatialClusterer + ?Sized,
{
    let started = Instant::now();
    let paths = OutputPaths::for_image(path, options.output_dir.as_deref());

    let outcome = match options.mode {
        Mode::Lists => {
            let (detections, lists) =
                extract_image_lists(engine, clusterer, path, options.preprocess)?;
            write_file(&paths.raw, |w| write_raw(w, &detections))?;
            write_file(&paths.cleaned, |w| write_lists(w, &lists))?;
            ImageOutcome {
                image: path.to_path_buf(),
                detections: detections.len(),
                lists: lists.len(),
                outputs: vec![paths.raw, paths.cleaned],
            }
        }
        Mode::Plain => {
            let detections = recognize_image(engine, path, options.preprocess)?;
            write_file(&paths.cleaned, |w| write_plain(w, &detections))?;
            ImageOutcome {
                image: path.to_path_buf(),
                detections: detections.len(),
                lists: 0,
                outputs: vec![paths.cleaned],
            }
        }
    };

    debug!(
        file = %path.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "image finished"
    );
    Ok(outcome)
}

/// Lists the supported images directly inside `dir`, sorted by file name.
pub fn discover_images(dir: &Path, mode: Mode) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ListError::NotADirectory(dir.to_path_buf()));
    }
    let io_err = |source| ListError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && mode.accepts(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Splits discovered images into groups that write the same output files,
/// keeping each image's position in the batch.
fn group_by_output(
    images: Vec<PathBuf>,
    output_dir: Option<&Path>,
) -> Vec<Vec<(usize, PathBuf)>> {
    let mut groups: Vec<Vec<(usize, PathBuf)>> = Vec::new();
    let mut slot: FxHashMap<PathBuf, usize> = FxHashMap::default();
    for (index, image) in images.into_iter().enumerate() {
        let key = OutputPaths::for_image(&image, output_dir).cleaned;
        let at = *slot.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[at].push((index, image));
    }
    groups
}

fn process_one<S, C>(
    engine: &S,
    clusterer: &C,
    image: PathBuf,
    options: &ExtractOptions,
) -> FileOutcome
where
    S: TokenSource + ?Sized,
    C: SpatialClusterer + ?Sized,
{
    match process_image(engine, clusterer, &image, options) {
        Ok(outcome) => {
            info!(
                file = %image.display(),
                detections = outcome.detections,
                lists = outcome.lists,
                "processed image"
            );
            FileOutcome::Succeeded(outcome)
        }
        Err(error) => {
            warn!(file = %image.display(), %error, "error processing image");
            FileOutcome::Failed { image, error }
        }
    }
}

/// Processes every supported image in `dir` with the default clusterer.
///
/// Directory-level problems are returned as errors. Failures of individual
/// images are logged and recorded in the report; they never abort the batch.
pub fn process_folder<S>(
    engine: &S,
    dir: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<BatchReport>
where
    S: TokenSource + ?Sized,
{
    let params = ClusterParams::new(options.params.eps)?;
    let clusterer = DensityClusterer::from_params(&params);
    debug!(eps = clusterer.eps(), "using density clusterer");
    process_folder_with(engine, &clusterer, dir, options)
}

/// Like [`process_folder`], with a caller-supplied clusterer.
pub fn process_folder_with<S, C>(
    engine: &S,
    clusterer: &C,
    dir: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<BatchReport>
where
    S: TokenSource + ?Sized,
    C: SpatialClusterer + ?Sized,
{
    let dir = dir.as_ref();
    let images = discover_images(dir, options.mode)?;
    if let Some(out) = &options.output_dir {
        fs::create_dir_all(out).map_err(|source| ListError::Io {
            path: out.clone(),
            source,
        })?;
    }
    info!(
        dir = %dir.display(),
        images = images.len(),
        engine = engine.name(),
        "starting batch"
    );

    let thread_count = options.threads.unwrap_or_else(default_thread_count).max(1);
    let pool = ThreadPoolBuilder::new().num_threads(thread_count).build()?;

    // Images sharing a stem share output files; each such group runs in
    // order on one worker so the last image wins both dumps.
    let groups = group_by_output(images, options.output_dir.as_deref());
    let mut indexed: Vec<(usize, FileOutcome)> = pool.install(|| {
        groups
            .into_par_iter()
            .flat_map_iter(|group| {
                group.into_iter().map(move |(index, image)| {
                    (index, process_one(engine, clusterer, image, options))
                })
            })
            .collect()
    });
    indexed.sort_by_key(|(index, _)| *index);
    let outcomes = indexed.into_iter().map(|(_, outcome)| outcome).collect();

    Ok(BatchReport { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_extensions_ignore_case() {
        assert!(Mode::Lists.accepts(Path::new("a/b.PNG")));
        assert!(Mode::Lists.accepts(Path::new("b.JpEg")));
        assert!(!Mode::Lists.accepts(Path::new("b.bmp")));
        assert!(Mode::Plain.accepts(Path::new("b.TIFF")));
        assert!(!Mode::Plain.accepts(Path::new("b.txt")));
        assert!(!Mode::Plain.accepts(Path::new("png")));
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.params.eps, 50.0);
        assert_eq!(options.mode, Mode::Lists);
        assert!(options.preprocess);
    }

    #[test]
    fn test_plain_mode_skips_binarization_by_default() {
        let options = ExtractOptions::for_mode(Mode::Plain);
        assert_eq!(options.mode, Mode::Plain);
        assert!(!options.preprocess);
        assert!(ExtractOptions::for_mode(Mode::Lists).preprocess);
    }

    #[test]
    fn test_group_by_output_joins_shared_stems() {
        let images = vec![
            PathBuf::from("d/page.jpg"),
            PathBuf::from("d/page.pa.png"),
            PathBuf::from("d/page.png"),
        ];
        let groups = group_by_output(images, None);
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0],
            vec![
                (0, PathBuf::from("d/page.jpg")),
                (2, PathBuf::from("d/page.png"))
            ]
        );
        assert_eq!(groups[1], vec![(1, PathBuf::from("d/page.pa.png"))]);
    }

    #[test]
    fn test_discover_rejects_missing_dir() {
        let err = discover_images(Path::new("/nonexistent/listscan"), Mode::Lists).unwrap_err();
        assert!(matches!(err, ListError::NotADirectory(_)));
    }
}
