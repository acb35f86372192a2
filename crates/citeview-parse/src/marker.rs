//! Scanning for `[docN]` markers.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use citeview_core::types::Citation;

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[doc([0-9]+)\]").expect("marker pattern compiles"));

/// One well-formed marker occurrence in answer text.
///
/// `index` is the 1-based position the marker points at in the raw citation
/// list, or `None` when the digit run does not fit in a `usize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub range: Range<usize>,
    pub index: Option<usize>,
}

impl Marker {
    /// The citation this marker points at, if the index is in range.
    pub fn resolve<'a>(&self, citations: &'a [Citation]) -> Option<&'a Citation> {
        self.index.and_then(|n| n.checked_sub(1)).and_then(|i| citations.get(i))
    }
}

/// Well-formed markers in `text`, left to right. Malformed ones (`[doc]`,
/// `[docX]`, an unterminated `[doc3`) are not reported.
pub fn find_markers(text: &str) -> Vec<Marker> {
    MARKER_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Marker { range: whole.range(), index: caps[1].parse().ok() })
        })
        .collect()
}
