//! # matrix-build
//!
//! CI helper that reads a build matrix from a JSON file and runs a build
//! script for one example application.
//!
//! ## Usage
//!
//! ```bash
//! matrix-build --json-file-path ci/matrix.json \
//!     --example-app exampleApp \
//!     --build-script ./build_script.sh
//! ```
//!
//! Inputs can also arrive through the environment as `INPUT_JSON_FILE_PATH`,
//! `INPUT_EXAMPLE_APP` and `INPUT_BUILD_SCRIPT`, matching how CI action
//! inputs surface to the process.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

mod dispatch;
mod matrix;

#[derive(Parser)]
#[command(
    name = "matrix-build",
    about = "Run a build script for one application from a JSON build matrix"
)]
struct Cli {
    /// Path to the build-matrix JSON file.
    #[arg(long, env = "INPUT_JSON_FILE_PATH")]
    json_file_path: PathBuf,

    /// Matrix key naming the application to build.
    #[arg(long, env = "INPUT_EXAMPLE_APP")]
    example_app: String,

    /// Executable that performs the actual build.
    #[arg(long, env = "INPUT_BUILD_SCRIPT")]
    build_script: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

/// Single pipeline: load the matrix, pick the entry, run the build script.
///
/// Loader, lookup and invocation-construction failures are reported with the
/// `Action failed with error:` prefix. Execution failures keep the
/// dispatcher's own `Build script failed with error:` prefix and are not
/// wrapped again.
fn run(cli: &Cli) -> Result<()> {
    let invocation = prepare(cli).map_err(|e| anyhow!("Action failed with error: {e:#}"))?;
    invocation.run()
}

fn prepare(cli: &Cli) -> Result<dispatch::Invocation> {
    let matrix = matrix::load(&cli.json_file_path)?;
    let entry = matrix.entry_for(&cli.example_app)?;
    dispatch::Invocation::new(&cli.build_script, &cli.example_app, entry)
}
