//! CLI for the harx HAR content extractor.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use harx_core::config::{self, HarxConfig};
use harx_core::extractor::{ExtractReport, Extractor};
use harx_core::har;
use harx_core::url_model::PathOptions;
use std::path::PathBuf;

/// Extract every response body from a HAR archive into files.
#[derive(Debug, Parser)]
#[command(name = "harx", version)]
#[command(
    about = "Extracts and saves all HTTP response bodies from a HAR file",
    long_about = None,
    after_help = "Example: harx my_archive.har -o extracted_files"
)]
pub struct Cli {
    /// Path to the input .har file.
    pub har_file: PathBuf,

    /// Directory to save the extracted files (default: ./output).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Put each host's files in a directory named after the host.
    #[arg(long)]
    pub by_host: bool,

    /// Only print warnings and the final summary.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let report = cli.execute(&cfg)?;
        report::print_report(&report, &cli.output_root(&cfg), cli.quiet);
        Ok(())
    }

    /// Output root: `--output`, else the config file, else `./output`.
    pub fn output_root(&self, cfg: &HarxConfig) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| cfg.output_dir.clone())
    }

    pub fn path_options(&self, cfg: &HarxConfig) -> PathOptions {
        let mut opts = PathOptions::from(cfg);
        opts.group_by_host |= self.by_host;
        opts
    }

    /// Loads the archive, then extracts it. Nothing is created on disk when
    /// the archive cannot be loaded.
    pub fn execute(&self, cfg: &HarxConfig) -> Result<ExtractReport> {
        let doc = har::load_har(&self.har_file)?;
        let output_root = self.output_root(cfg);
        let extractor = Extractor::new(self.path_options(cfg));
        extractor
            .run(&doc, &output_root)
            .with_context(|| format!("extract {}", self.har_file.display()))
    }
}
