//! # cat-extract
//!
//! `cat-extract` is a command line extractor for Egosoft cat/dat archive
//! pairs, built on [cat-rs](https://github.com/echo000/cat-rs).
//!
//! ## Usage
//! ```sh
//! cat_extract "path/to/X4 Foundations" out -t xml,lua -e
//! ```

use cat_rs::cat_storage::StorageOptions;
use cat_rs::extension_filter::ExtensionFilter;
use cat_rs::extractor::extract;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract files from Egosoft cat/dat archive pairs
#[derive(Parser)]
#[command(name = "cat-extract")]
#[command(author, version, about = "Extract files from Egosoft cat/dat archive pairs", long_about = None)]
struct Cli {
    /// The directory where the cat files are located
    sourcedir: PathBuf,

    /// The directory where to extract any matching files
    destdir: PathBuf,

    /// Specific cat files to extract, e.g. 01.cat (default: all cat files found)
    #[arg(short, long, num_args = 1..)]
    include: Vec<String>,

    /// A comma separated list of file extensions to extract
    #[arg(short, long, default_value = "xml,xsd,html,js,css,lua")]
    types: String,

    /// Also extract official expansion archives found under extensions/
    #[arg(short, long)]
    expansions: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let filter = ExtensionFilter::new(cli.types.split(','));
    if filter.is_empty() {
        log::error!("no file types specified for extraction");
        return ExitCode::FAILURE;
    }

    if let Err(err) = std::fs::create_dir_all(&cli.destdir) {
        log::error!("cannot create {}: {err}", cli.destdir.display());
        return ExitCode::FAILURE;
    }

    log::info!("Extracting files to {}", cli.destdir.display());
    log::info!("Extracting types: {}", cli.types);

    let options = StorageOptions {
        include: cli.include,
        expansions: cli.expansions,
    };

    match extract(&cli.sourcedir, &cli.destdir, filter, &options) {
        Ok(summary) => {
            println!(
                "extracted {} files ({} bytes), skipped {}, failed {}",
                summary.extracted, summary.bytes_extracted, summary.skipped, summary.failed
            );
            for (path, reason) in &summary.failures {
                println!("  failed: {path}: {reason}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
