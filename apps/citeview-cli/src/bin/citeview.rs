use anyhow::Context;
use clap::Parser;

use citeview_cli::{display_config, init_tracing, read_answer};
use citeview_core::config::MarkerStyle;
use citeview_parse::MarkerParser;
use citeview_view::AnswerView;

/// Render one chat answer with its citations
#[derive(Parser, Debug)]
#[command(name = "citeview")]
struct Args {
    /// Answer JSON file (`{"answer": ..., "citations": [...]}`); stdin when omitted or `-`
    file: Option<String>,

    /// Print the parsed answer as JSON instead of markdown
    #[arg(long)]
    json: bool,

    /// Marker style for rewritten references: doc or superscript
    #[arg(long)]
    style: Option<MarkerStyle>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let display = display_config(args.style).context("loading display config")?;
    let raw = read_answer(args.file.as_deref()).context("reading answer payload")?;

    if args.json {
        let parsed = MarkerParser::from_config(&display).parse(&raw);
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        let rendered = AnswerView::from_config(&display).render(&raw);
        print!("{}", rendered.to_markdown());
        if let Some(summary) = rendered.reference_summary {
            tracing::info!("{summary}");
        }
    }
    Ok(())
}
