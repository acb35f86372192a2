use serde::Serialize;
use tracing::warn;

use citeview_core::config::DisplayConfig;
use citeview_core::traits::{AnswerParser, CitationLabeler};
use citeview_core::types::{Citation, RawAnswer};
use citeview_format::{compact_source, compact_title, CitationFormatter};
use citeview_parse::MarkerParser;

pub const SOURCES_HEADING: &str = "Sources";
pub const DISCLAIMER: &str = "AI-generated content may be incorrect";

/// One row of the sources list shown under an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    /// 1-based, matches the `[docK]` markers in the answer text.
    pub position: usize,
    pub title: String,
    pub source: String,
    pub tooltip: String,
    pub citation: Citation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAnswer {
    pub markdown: String,
    pub sources: Vec<SourceEntry>,
    pub reference_summary: Option<String>,
    pub disclaimer: Option<&'static str>,
}

impl RenderedAnswer {
    /// Answer text followed by a plain sources list and the disclaimer.
    pub fn to_markdown(&self) -> String {
        let mut out = self.markdown.clone();
        if self.sources.is_empty() {
            return out;
        }
        out.push_str("\n\n");
        out.push_str(SOURCES_HEADING);
        out.push('\n');
        for entry in &self.sources {
            out.push_str(&format!("{}. {} • {}\n", entry.position, entry.title, entry.source));
        }
        if let Some(disclaimer) = self.disclaimer {
            out.push('\n');
            out.push_str(disclaimer);
            out.push('\n');
        }
        out
    }
}

/// `"1 reference"` / `"N references"`; `None` when nothing is cited.
pub fn reference_summary(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 reference".to_string()),
        n => Some(format!("{n} references")),
    }
}

pub struct AnswerView<P, L> where P: AnswerParser, L: CitationLabeler {
    parser: P,
    labeler: L,
}

impl AnswerView<MarkerParser, CitationFormatter> {
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(MarkerParser::from_config(display), CitationFormatter::from_config(display))
    }
}

impl Default for AnswerView<MarkerParser, CitationFormatter> {
    fn default() -> Self { Self::from_config(&DisplayConfig::default()) }
}

impl<P, L> AnswerView<P, L> where P: AnswerParser, L: CitationLabeler {
    pub fn new(parser: P, labeler: L) -> Self { Self { parser, labeler } }

    pub fn render(&self, raw: &RawAnswer) -> RenderedAnswer {
        if let Some(error) = raw.error.as_deref() {
            warn!(error, "answer arrived with an upstream error");
        }
        let parsed = self.parser.parse(raw);
        let sources: Vec<SourceEntry> = parsed
            .citations
            .into_iter()
            .enumerate()
            .map(|(i, citation)| {
                let position = i + 1;
                SourceEntry {
                    position,
                    title: compact_title(&citation).to_string(),
                    source: compact_source(&citation).to_string(),
                    tooltip: self.labeler.label(&citation, position, false),
                    citation,
                }
            })
            .collect();
        let cited = !sources.is_empty();
        RenderedAnswer {
            markdown: parsed.markdown_format_text,
            reference_summary: reference_summary(sources.len()),
            disclaimer: cited.then_some(DISCLAIMER),
            sources,
        }
    }
}
