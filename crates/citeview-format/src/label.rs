use std::borrow::Cow;

use citeview_core::config::DisplayConfig;
use citeview_core::traits::CitationLabeler;
use citeview_core::types::Citation;

/// Builds `"{filepath} - Part {chunk + 1}"` labels, falling back to
/// `"Citation {position}"` when there is no filepath or no integer chunk id.
#[derive(Debug, Clone)]
pub struct CitationFormatter {
    truncation_limit: usize,
    keep_chars: usize,
    ellipsis: String,
}

impl Default for CitationFormatter {
    fn default() -> Self { Self::from_config(&DisplayConfig::default()) }
}

impl CitationFormatter {
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            truncation_limit: display.truncation_limit,
            keep_chars: display.keep_chars,
            ellipsis: display.ellipsis.clone(),
        }
    }

    pub fn label(&self, citation: &Citation, position: usize, truncate: bool) -> String {
        let filepath = citation.filepath.as_deref().filter(|p| !p.is_empty());
        let chunk = citation.chunk_id.as_deref().and_then(parse_chunk_index);
        match (filepath, chunk) {
            (Some(filepath), Some(chunk)) => {
                let shown = if truncate {
                    truncate_middle(filepath, self.truncation_limit, self.keep_chars, &self.ellipsis)
                } else {
                    Cow::Borrowed(filepath)
                };
                format!("{shown} - Part {}", chunk.saturating_add(1))
            }
            _ => format!("Citation {position}"),
        }
    }
}

impl CitationLabeler for CitationFormatter {
    fn label(&self, citation: &Citation, position: usize, truncate: bool) -> String {
        Self::label(self, citation, position, truncate)
    }
}

/// 0-based chunk number from its wire form; `None` unless it is a base-10 integer.
pub fn parse_chunk_index(chunk_id: &str) -> Option<i64> {
    chunk_id.trim().parse().ok()
}

/// Keeps the first and last `keep` characters of `path` around `ellipsis`
/// when it is longer than `limit` characters.
pub fn truncate_middle<'a>(path: &'a str, limit: usize, keep: usize, ellipsis: &str) -> Cow<'a, str> {
    let len = path.chars().count();
    if len <= limit || keep.saturating_mul(2) >= len {
        return Cow::Borrowed(path);
    }
    let byte_at = |n: usize| path.char_indices().nth(n).map_or(path.len(), |(i, _)| i);
    let head = &path[..byte_at(keep)];
    let tail = &path[byte_at(len - keep)..];
    Cow::Owned(format!("{head}{ellipsis}{tail}"))
}
