use citeview_core::config::MarkerStyle;
use citeview_core::types::{Citation, ParsedAnswer, RawAnswer};
use citeview_parse::{find_markers, parse_answer, MarkerParser};

fn citations(ids: &[&str]) -> Vec<Citation> {
    ids.iter().map(|id| Citation::new(*id, format!("content of {id}"))).collect()
}

/// Ids referenced by the output markers, in text order.
fn referenced_ids(text: &str, cited: &[Citation]) -> Vec<String> {
    find_markers(text)
        .into_iter()
        .map(|m| {
            let k = m.index.expect("output index fits usize");
            cited[k - 1].id.clone()
        })
        .collect()
}

#[test]
fn repeated_marker_collapses_to_one_citation() {
    let raw = RawAnswer::new("A [doc1] and B [doc2] and A again [doc1]", citations(&["x", "y"]));
    let parsed = parse_answer(&raw);

    let ids: Vec<&str> = parsed.citations.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["x", "y"]);
    assert_eq!(parsed.markdown_format_text, "A [doc1] and B [doc2] and A again [doc1]");
}

#[test]
fn indices_follow_first_appearance_not_raw_position() {
    let raw = RawAnswer::new("First [doc3], then [doc1], then [doc3].", citations(&["a", "b", "c"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, "First [doc1], then [doc2], then [doc1].");
    assert_eq!(parsed.citations[0].id, "c");
    assert_eq!(parsed.citations[1].id, "a");
    // "b" was never referenced
    assert_eq!(parsed.citations.len(), 2);
}

#[test]
fn rewritten_markers_are_not_rewritten_again() {
    // [doc2] -> [doc1] must not then be picked up as a reference to raw index 1
    let raw = RawAnswer::new("[doc2] [doc1]", citations(&["first", "second"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, "[doc1] [doc2]");
    assert_eq!(referenced_ids(&parsed.markdown_format_text, &parsed.citations), ["second", "first"]);
}

#[test]
fn duplicate_ids_in_raw_list_are_merged() {
    let raw = RawAnswer::new("[doc1] [doc2] [doc3]", citations(&["same", "same", "other"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.citations.len(), 2);
    assert_eq!(parsed.markdown_format_text, "[doc1] [doc1] [doc2]");
}

#[test]
fn identical_content_with_different_ids_is_not_merged() {
    let mut cited = citations(&["one", "two"]);
    cited[1].content = cited[0].content.clone();
    let raw = RawAnswer::new("[doc1][doc2]", cited);
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.citations.len(), 2);
    assert_eq!(parsed.markdown_format_text, "[doc1][doc2]");
}

#[test]
fn text_without_markers_passes_through() {
    let raw = RawAnswer::new("no markers here", citations(&["x", "y"]));
    let parsed = parse_answer(&raw);

    assert!(parsed.citations.is_empty());
    assert_eq!(parsed.markdown_format_text, "no markers here");
}

#[test]
fn unresolved_markers_are_removed() {
    let raw = RawAnswer::new("Known [doc1], unknown [doc7], zero [doc0].", citations(&["x"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, "Known [doc1], unknown , zero .");
    assert_eq!(parsed.citations.len(), 1);
}

/// Every marker in `parsed` points inside its citation list, and parsing the
/// output again changes nothing.
fn assert_markers_resolve(parsed: &ParsedAnswer) {
    for marker in find_markers(&parsed.markdown_format_text) {
        assert!(
            marker.resolve(&parsed.citations).is_some(),
            "dangling marker at {:?} in {:?}",
            marker.range,
            parsed.markdown_format_text
        );
    }
    let again = parse_answer(&RawAnswer::new(parsed.markdown_format_text.clone(), parsed.citations.clone()));
    assert_eq!(again.markdown_format_text, parsed.markdown_format_text);
    assert_eq!(again.citations.len(), parsed.citations.len());
}

#[test]
fn removing_a_marker_cannot_leave_a_dangling_one() {
    let raw = RawAnswer::new("see [doc[doc9]1] here", Vec::new());
    let parsed = parse_answer(&raw);
    assert_eq!(parsed.markdown_format_text, "see  here");
    assert!(parsed.citations.is_empty());

    let raw = RawAnswer::new("[doc[doc[doc9]9]1]", Vec::new());
    assert_eq!(parse_answer(&raw).markdown_format_text, "");
}

#[test]
fn marker_joined_by_removal_is_resolved_like_any_other() {
    let raw = RawAnswer::new("A [doc1] B [doc[doc7]2]", citations(&["x", "y"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, "A [doc1] B [doc2]");
    let ids: Vec<&str> = parsed.citations.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["x", "y"]);
    assert_markers_resolve(&parsed);

    let parsed = parse_answer(&RawAnswer::new("see [doc[doc9]1] here", citations(&["only"])));
    assert_eq!(parsed.markdown_format_text, "see [doc1] here");
    assert_markers_resolve(&parsed);
}

#[test]
fn empty_citation_list_removes_every_marker() {
    let raw = RawAnswer::new("A [doc1] B [doc2]", Vec::new());
    let parsed = parse_answer(&raw);

    assert!(parsed.citations.is_empty());
    assert_eq!(parsed.markdown_format_text, "A  B ");
}

#[test]
fn oversized_index_is_unresolved() {
    let raw = RawAnswer::new("x[doc999999999999999999999999]y", citations(&["x"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, "xy");
    assert!(parsed.citations.is_empty());
}

#[test]
fn malformed_markers_stay_verbatim() {
    let text = "[doc] [docX] [doc3 [ doc1] [DOC1] [doc-1] [doc١]";
    let raw = RawAnswer::new(text, citations(&["a", "b", "c"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, text);
    assert!(parsed.citations.is_empty());
}

#[test]
fn output_citations_carry_dense_reindex_id() {
    let raw = RawAnswer::new("[doc2] [doc1]", citations(&["a", "b"]));
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.citations[0].reindex_id.as_deref(), Some("1"));
    assert_eq!(parsed.citations[1].reindex_id.as_deref(), Some("2"));
    // everything else is copied unchanged
    assert_eq!(parsed.citations[0].content, "content of b");
    assert!(raw.citations.iter().all(|c| c.reindex_id.is_none()));
}

#[test]
fn superscript_style_renders_caret_markers() {
    let raw = RawAnswer::new("Fact[doc2]. Other[doc1].", citations(&["a", "b"]));
    let parsed = MarkerParser::new(MarkerStyle::Superscript).parse(&raw);

    assert_eq!(parsed.markdown_format_text, "Fact ^1^ . Other ^2^ .");
}

#[test]
fn parsing_is_repeatable() {
    let raw = RawAnswer::new("[doc2] then [doc9] then [doc2][doc1]", citations(&["a", "b"]));
    assert_eq!(parse_answer(&raw), parse_answer(&raw));
}

#[test]
fn marker_invariants_hold_for_mixed_answers() {
    let ids = ["p", "q", "p", "r", "s", "q"];
    let cited = citations(&ids);
    let answers = [
        "[doc1][doc2][doc3][doc4][doc5][doc6]",
        "[doc6] x [doc6] y [doc4] z [doc1] [doc12]",
        "start [doc5][doc5][doc5] end",
        "[doc3] and [doc1] refer to the same id",
        "[doc2][doc4][doc0][doc6][doc3]",
    ];

    for answer in answers {
        let raw = RawAnswer::new(answer, cited.clone());
        let parsed = parse_answer(&raw);

        // what each resolvable input marker pointed at
        let expected: Vec<String> = find_markers(answer)
            .into_iter()
            .filter_map(|m| m.resolve(&raw.citations))
            .map(|c| c.id.clone())
            .collect();

        assert_eq!(referenced_ids(&parsed.markdown_format_text, &parsed.citations), expected, "{answer}");

        let mut first_seen: Vec<String> = Vec::new();
        for id in &expected {
            if !first_seen.contains(id) {
                first_seen.push(id.clone());
            }
        }
        let out_ids: Vec<String> = parsed.citations.iter().map(|c| c.id.clone()).collect();
        assert_eq!(out_ids, first_seen, "{answer}");
        assert_markers_resolve(&parsed);
    }
}

#[test]
fn parses_wire_payload() {
    let payload = serde_json::json!({
        "answer": "Solar panels degrade slowly [doc2].",
        "citations": [
            {"content": "unused", "id": "u"},
            {"content": "Degradation is ~0.5%/yr", "id": "nrel", "filepath": "pv/degradation.pdf", "chunk_id": "0"}
        ]
    });
    let raw: RawAnswer = serde_json::from_value(payload).unwrap();
    let parsed = parse_answer(&raw);

    assert_eq!(parsed.markdown_format_text, "Solar panels degrade slowly [doc1].");
    assert_eq!(parsed.citations[0].filepath.as_deref(), Some("pv/degradation.pdf"));

    let out = serde_json::to_value(&parsed).unwrap();
    assert_eq!(out["markdownFormatText"], "Solar panels degrade slowly [doc1].");
}
