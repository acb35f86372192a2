//! Wire and display types shared by the parser, the formatter and the view.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Secondary descriptive fields attached to a citation by the retrieval backend.
///
/// Every field is optional; consumers must handle absence of each one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMetadata {
    #[serde(default)]
    pub chunk: Option<i64>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub markdown_url: Option<String>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A source document reference, identified by `id`.
///
/// - `content`: the retrieved passage text
/// - `filepath`/`chunk_id`: used for the "file - Part N" label
/// - `reindex_id`: dense 1-based display index, set by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filepath: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub metadata: Option<CitationMetadata>,
    #[serde(default, deserialize_with = "chunk_id_from_string_or_number")]
    pub chunk_id: Option<String>,
    #[serde(default)]
    pub reindex_id: Option<String>,
}

impl Citation {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), content: content.into(), ..Self::default() }
    }
}

/// Upstream emits `chunk_id` either as a string or as a bare JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChunkIdRepr {
    Text(String),
    Number(serde_json::Number),
}

fn chunk_id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<ChunkIdRepr>::deserialize(deserializer)?;
    Ok(repr.map(|r| match r {
        ChunkIdRepr::Text(s) => s,
        ChunkIdRepr::Number(n) => n.to_string(),
    }))
}

/// The answer as received from the chat service: text with `[docN]` markers
/// plus the citation list those markers index into (1-based).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswer {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RawAnswer {
    pub fn new(answer: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self { answer: answer.into(), citations, error: None }
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Pairs the assistant's answer text with the citations carried by the
    /// preceding tool message, whose content is a JSON-encoded [`ToolMessageContent`].
    pub fn from_tool_message(answer: impl Into<String>, tool_content: &str) -> Result<Self> {
        let content: ToolMessageContent = serde_json::from_str(tool_content)?;
        Ok(Self::new(answer, content.citations))
    }
}

/// Payload of the "tool" role message in a chat completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMessageContent {
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub intent: String,
}

/// Answer text with markers rewritten to dense indices, plus the
/// deduplicated citations in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnswer {
    pub citations: Vec<Citation>,
    #[serde(rename = "markdownFormatText")]
    pub markdown_format_text: String,
}
