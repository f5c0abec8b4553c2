mod args;
mod cmd;
mod config;
mod error;
mod input;
mod manifest;
mod platform;
mod remap;
mod result;
mod runfiles;
mod zipper;

use args::Args;
use manifest::Manifest;
use runfiles::Runfiles;
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let args = Args::parse()?;
    init_logging(args.verbose);

    let config = args.into_config()?;

    let files = input::read_input_manifest(&config.input_files_manifest)?;

    let manifest_path = config.manifest_path();
    Manifest::build(&config, &files).write(&manifest_path)?;
    log::info!("wrote zipper manifest {}", manifest_path.display());

    let argv0 = std::env::args_os().next().map(PathBuf::from).unwrap_or_default();
    let runfiles = Runfiles::create(&argv0)?;
    zipper::create_archive(&runfiles, &config.output, &manifest_path)
}

/// Log to stderr at `warn`, or `debug` with `--verbose`; `RUST_LOG` overrides both
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
