//! citeview-parse
//!
//! Resolves `[docN]` citation markers in model answers: deduplicates the
//! referenced citations by id and renumbers them densely by first appearance.

pub mod marker;
pub mod parser;

pub use marker::{find_markers, Marker};
pub use parser::{parse_answer, MarkerParser};
