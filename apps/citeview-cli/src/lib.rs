//! Shared plumbing for the `citeview` and `citeview-batch` binaries.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use citeview_core::config::{expand_path, Config, DisplayConfig, MarkerStyle};
use citeview_core::traits::AnswerParser;
use citeview_core::types::RawAnswer;

const PARSED_SUFFIX: &str = "parsed.json";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Display settings from the layered config, with an optional command-line style override.
pub fn display_config(style: Option<MarkerStyle>) -> citeview_core::Result<DisplayConfig> {
    let mut display = Config::load()?.display()?;
    if let Some(style) = style {
        display.marker_style = style;
    }
    Ok(display)
}

/// Reads one answer payload from `path`, or from stdin when it is absent or `-`.
pub fn read_answer(path: Option<&str>) -> citeview_core::Result<RawAnswer> {
    let payload = match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(p) => fs::read_to_string(expand_path(p))?,
    };
    RawAnswer::from_json(&payload)
}

/// `*.json` files under `root`, sorted, excluding earlier `*.parsed.json` outputs.
pub fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let is_output = path.to_str().is_some_and(|s| s.ends_with(&format!(".{PARSED_SUFFIX}")));
        if is_json && !is_output {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Parses every answer file under `in_dir` and writes `<stem>.parsed.json`
/// into `out_dir`, mirroring the relative layout. Unreadable or invalid
/// payloads are recorded in the report and skipped.
pub fn process_directory<P: AnswerParser>(
    parser: &P,
    in_dir: &Path,
    out_dir: &Path,
    progress: &ProgressBar,
) -> citeview_core::Result<BatchReport> {
    let files = list_json_files(in_dir);
    progress.set_length(files.len() as u64);
    let mut report = BatchReport::default();

    for file in files {
        progress.set_message(file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        let raw = match fs::read_to_string(&file).map_err(citeview_core::Error::from).and_then(|s| RawAnswer::from_json(&s)) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping answer file");
                report.skipped.push((file, e.to_string()));
                progress.inc(1);
                continue;
            }
        };
        let parsed = parser.parse(&raw);

        let relative = file.strip_prefix(in_dir).unwrap_or(&file);
        let target = out_dir.join(relative).with_extension(PARSED_SUFFIX);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, serde_json::to_string_pretty(&parsed)?)?;
        debug!(target = %target.display(), citations = parsed.citations.len(), "wrote parsed answer");
        report.written.push(target);
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(report)
}
