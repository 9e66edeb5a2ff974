//! Pieces shared by the extract-lists and extract-raw binaries.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::error::ErrorKind;
use clap::{Args, Parser, ValueEnum};
use listscan_core::api::{BatchReport, ExtractOptions, Mode};
use listscan_core::layout::ClusterParams;
use listscan_core::recognize::{DEFAULT_SIDECAR_SUFFIX, SidecarSource, TokenSource};
use tracing_subscriber::EnvFilter;

/// Recognition engine to load for the batch.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Engine {
    /// Read detections from `<name>.ocr.json` files written by an external service
    #[default]
    Sidecar,
    /// Run Tesseract (requires the `tesseract` feature)
    Tesseract,
}

/// Options shared by both tools.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Folder containing the images to process
    pub folder: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = clap::ArgAction::SetTrue)]
    pub debug: bool,

    /// Recognition engine
    #[arg(short = 'E', long, value_enum, default_value = "sidecar")]
    pub engine: Engine,

    /// Tesseract language codes (e.g. "eng", "eng+fra")
    #[arg(long, default_value = "eng")]
    pub lang: String,

    /// Suffix of detection files read by the sidecar engine
    #[arg(long = "sidecar-suffix", default_value = DEFAULT_SIDECAR_SUFFIX)]
    pub sidecar_suffix: String,

    /// Binarize pages (Otsu, inverted) before recognition [default in extract-lists]
    #[arg(long, action = clap::ArgAction::SetTrue, overrides_with = "no_preprocess")]
    pub preprocess: bool,

    /// Pass pages to the engine as loaded [default in extract-raw]
    #[arg(long = "no-preprocess", action = clap::ArgAction::SetTrue, overrides_with = "preprocess")]
    pub no_preprocess: bool,

    /// Directory to write results to (default: beside each image)
    #[arg(short = 'O', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Number of images processed in parallel (default: available cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl CommonArgs {
    pub fn options(&self, mode: Mode, eps: f64) -> Result<ExtractOptions> {
        if self.threads == Some(0) {
            bail!("--threads must be at least 1");
        }
        let preprocess = if self.preprocess {
            true
        } else if self.no_preprocess {
            false
        } else {
            mode.preprocess_by_default()
        };
        Ok(ExtractOptions {
            params: ClusterParams::new(eps).context("invalid --eps")?,
            preprocess,
            output_dir: self.output_dir.clone(),
            threads: self.threads,
            ..ExtractOptions::for_mode(mode)
        })
    }

    /// Loads the recognition engine once for the whole batch.
    pub fn load_engine(&self) -> Result<Box<dyn TokenSource>> {
        match self.engine {
            Engine::Sidecar => Ok(Box::new(SidecarSource::new(self.sidecar_suffix.as_str()))),
            Engine::Tesseract => load_tesseract(&self.lang),
        }
    }
}

#[cfg(feature = "tesseract")]
fn load_tesseract(lang: &str) -> Result<Box<dyn TokenSource>> {
    use listscan_core::recognize::{TesseractConfig, TesseractSource};

    let config = TesseractConfig {
        language: lang.to_string(),
        ..Default::default()
    };
    let engine = TesseractSource::new(&config).context("failed to load Tesseract")?;
    Ok(Box::new(engine))
}

#[cfg(not(feature = "tesseract"))]
fn load_tesseract(_lang: &str) -> Result<Box<dyn TokenSource>> {
    bail!("this build has no Tesseract support; rebuild with --features tesseract")
}

/// Parses arguments. Usage errors exit with status 1, help and version
/// requests with status 0.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins unless `debug` is set.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Checks the folder argument, printing the user-facing message on failure.
pub fn require_folder(folder: &Path) -> Option<ExitCode> {
    if folder.is_dir() {
        None
    } else {
        println!("The specified path is not a folder.");
        Some(ExitCode::from(1))
    }
}

/// Prints per-file failures and the closing confirmation.
pub fn print_report(report: &BatchReport, results_dir: &Path) {
    for (image, error) in report.failed() {
        let name = image.file_name().unwrap_or(image.as_os_str());
        eprintln!("Error processing {}: {}", name.to_string_lossy(), error);
    }
    println!("{}", report.summary());
    println!(
        "Processing completed. Results saved in {}.",
        results_dir.display()
    );
}

/// Turns the outcome of a run into the process exit status.
pub fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
