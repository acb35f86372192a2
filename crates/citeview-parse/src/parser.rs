use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use citeview_core::config::{DisplayConfig, MarkerStyle};
use citeview_core::traits::AnswerParser;
use citeview_core::types::{Citation, ParsedAnswer, RawAnswer};

use crate::marker::find_markers;

/// Rewrites `[docN]` markers to dense, first-appearance indices.
///
/// Citations are deduplicated by `id`: every marker that resolves to an
/// already-seen id reuses that id's index. Markers whose index falls outside
/// the raw citation list are removed from the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerParser {
    style: MarkerStyle,
}

impl MarkerParser {
    pub fn new(style: MarkerStyle) -> Self { Self { style } }

    pub fn from_config(display: &DisplayConfig) -> Self { Self::new(display.marker_style) }

    pub fn parse(&self, raw: &RawAnswer) -> ParsedAnswer {
        let text = strip_unresolved(&raw.answer, &raw.citations);

        let mut assigned: HashMap<&str, usize> = HashMap::new();
        let mut citations: Vec<Citation> = Vec::new();
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        // Every marker left in `text` resolves. Rendered markers are complete
        // tokens, so they cannot combine with neighbouring text into new ones.
        for marker in find_markers(&text) {
            let Some(citation) = marker.resolve(&raw.citations) else {
                continue;
            };
            let index = *assigned.entry(citation.id.as_str()).or_insert_with(|| {
                let index = citations.len() + 1;
                let mut kept = citation.clone();
                kept.reindex_id = Some(index.to_string());
                citations.push(kept);
                index
            });
            out.push_str(&text[last..marker.range.start]);
            out.push_str(&self.style.render(index));
            last = marker.range.end;
        }
        out.push_str(&text[last..]);

        debug!(citations = citations.len(), "parsed answer");
        ParsedAnswer { citations, markdown_format_text: out }
    }
}

impl AnswerParser for MarkerParser {
    fn parse(&self, raw: &RawAnswer) -> ParsedAnswer { Self::parse(self, raw) }
}

/// Parses with the default `[docK]` marker style.
pub fn parse_answer(raw: &RawAnswer) -> ParsedAnswer {
    MarkerParser::default().parse(raw)
}

/// Removes unresolved markers until none remain. Removing `[doc9]` from
/// `[doc[doc9]1]` joins the neighbours into `[doc1]`, so one pass is not enough.
fn strip_unresolved<'a>(answer: &'a str, citations: &[Citation]) -> Cow<'a, str> {
    let mut text = Cow::Borrowed(answer);
    loop {
        let unresolved: Vec<_> =
            find_markers(&text).into_iter().filter(|m| m.resolve(citations).is_none()).collect();
        if unresolved.is_empty() {
            return text;
        }
        debug!(count = unresolved.len(), available = citations.len(), "dropping unresolved citation markers");

        let mut kept = String::with_capacity(text.len());
        let mut last = 0;
        for marker in &unresolved {
            kept.push_str(&text[last..marker.range.start]);
            last = marker.range.end;
        }
        kept.push_str(&text[last..]);
        text = Cow::Owned(kept);
    }
}
