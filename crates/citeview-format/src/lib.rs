//! citeview-format
//!
//! Display labels for citations: the "file - Part N" tooltip label and the
//! compact title/source pair shown in a sources list.

pub mod compact;
pub mod label;

pub use compact::{compact_source, compact_title, FALLBACK_SOURCE, FALLBACK_TITLE};
pub use label::{parse_chunk_index, truncate_middle, CitationFormatter};
