use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use citeview_cli::{display_config, init_tracing, process_directory};
use citeview_core::config::{expand_path, MarkerStyle};
use citeview_parse::MarkerParser;

/// Parse every answer JSON file under a directory
#[derive(Parser, Debug)]
#[command(name = "citeview-batch")]
struct Args {
    /// Directory searched recursively for `*.json` answer files
    in_dir: String,

    /// Directory receiving `<name>.parsed.json` outputs
    out_dir: String,

    /// Marker style for rewritten references: doc or superscript
    #[arg(long)]
    style: Option<MarkerStyle>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let display = display_config(args.style).context("loading display config")?;
    let in_dir: PathBuf = expand_path(&args.in_dir);
    let out_dir: PathBuf = expand_path(&args.out_dir);
    info!(in_dir = %in_dir.display(), out_dir = %out_dir.display(), "parsing answers");

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} answers ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let parser = MarkerParser::from_config(&display);
    let report = process_directory(&parser, &in_dir, &out_dir, &pb)
        .with_context(|| format!("processing {}", in_dir.display()))?;

    println!("✅ Parsed {} answer files into {}", report.written.len(), out_dir.display());
    if !report.skipped.is_empty() {
        println!("⚠️  Skipped {} files:", report.skipped.len());
        for (path, reason) in &report.skipped {
            println!("  {}: {}", path.display(), reason);
        }
    }
    Ok(())
}
