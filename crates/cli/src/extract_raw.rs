//! extract-raw - Dump recognized text of every image in a folder
//!
//! Single pass without layout reconstruction: for every `.png`, `.jpg`,
//! `.jpeg`, `.bmp` or `.tiff` image, writes `<name>.txt` containing the
//! recognized lines joined by newlines.

mod common;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use listscan_core::api::{Mode, process_folder};
use listscan_core::layout::DEFAULT_EPS;

use common::{CommonArgs, finish, init_logging, parse_args, print_report, require_folder};

/// Extract recognized text from every image in a folder, one file per image.
#[derive(Parser, Debug)]
#[command(name = "extract-raw")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &Args) -> Result<()> {
    let options = args.common.options(Mode::Plain, DEFAULT_EPS)?;
    let engine = args.common.load_engine()?;

    let report = process_folder(engine.as_ref(), &args.common.folder, &options)?;
    for outcome in report.succeeded() {
        for output in &outcome.outputs {
            println!("Text saved to: {}", output.display());
        }
    }
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
