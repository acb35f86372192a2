use crate::types::{Citation, ParsedAnswer, RawAnswer};

/// Turns a raw model answer into renumbered text plus the citations it references.
///
/// Implementations must be total: malformed input degrades, it never fails.
pub trait AnswerParser: Send + Sync {
    fn parse(&self, raw: &RawAnswer) -> ParsedAnswer;
}

/// Produces the hover/tooltip label for one citation at a 1-based display position.
pub trait CitationLabeler: Send + Sync {
    fn label(&self, citation: &Citation, position: usize, truncate: bool) -> String;
}
