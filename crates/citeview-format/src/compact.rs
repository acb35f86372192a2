use citeview_core::types::{Citation, CitationMetadata};

pub const FALLBACK_TITLE: &str = "Citation";
pub const FALLBACK_SOURCE: &str = "Source";

fn metadata_field<'a>(citation: &'a Citation, pick: fn(&CitationMetadata) -> Option<&str>) -> Option<&'a str> {
    citation.metadata.as_ref().and_then(pick).filter(|v| !v.is_empty())
}

/// `metadata.title`, or `"Citation"` when it is missing or empty.
pub fn compact_title(citation: &Citation) -> &str {
    metadata_field(citation, |m| m.title.as_deref()).unwrap_or(FALLBACK_TITLE)
}

/// `metadata.source`, or `"Source"` when it is missing or empty.
pub fn compact_source(citation: &Citation) -> &str {
    metadata_field(citation, |m| m.source.as_deref()).unwrap_or(FALLBACK_SOURCE)
}
