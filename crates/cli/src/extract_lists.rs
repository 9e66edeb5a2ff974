//! extract-lists - Reconstruct word lists from a folder of scanned pages
//!
//! For every `.png`, `.jpg` or `.jpeg` image in the folder, writes
//! `<name>_raw.txt` with one recognized token per line and `<name>.txt` with
//! one `List <k>: w1, w2, ...` line per reconstructed list.

mod common;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use listscan_core::api::{Mode, process_folder};
use listscan_core::layout::DEFAULT_EPS;
use tracing::debug;

use common::{CommonArgs, finish, init_logging, parse_args, print_report, require_folder};

/// Reconstruct stacked word lists from every image in a folder.
#[derive(Parser, Debug)]
#[command(name = "extract-lists")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Neighbourhood radius in pixels: words whose centres are at most this
    /// far apart, directly or through a chain, belong to the same list
    #[arg(short = 'e', long, default_value_t = DEFAULT_EPS)]
    eps: f64,
}

fn run(args: &Args) -> Result<()> {
    let options = args.common.options(Mode::Lists, args.eps)?;
    let engine = args.common.load_engine()?;
    debug!(engine = engine.name(), eps = args.eps, "engine loaded");

    let report = process_folder(engine.as_ref(), &args.common.folder, &options)?;
    let results_dir = options
        .output_dir
        .as_deref()
        .unwrap_or(args.common.folder.as_path());
    print_report(&report, results_dir);
    Ok(())
}

fn main() -> ExitCode {
    let args: Args = parse_args();
    init_logging(args.common.debug);

    if let Some(code) = require_folder(&args.common.folder) {
        return code;
    }
    finish(run(&args))
}
