//! FqName computation for namespace headers.

use crate::helpers::source_fixtures::*;
use clsview::FqName;
use clsview::names::HeaderNode;
use clsview::parser::{AstNode, SourceFile, parse_source};
use rstest::rstest;

fn source_file(text: &str) -> SourceFile {
    let parse = parse_source(text);
    assert!(parse.ok(), "parse errors: {:?}", parse.errors);
    SourceFile::cast(parse.syntax()).expect("root is a source file")
}

fn header(text: &str) -> HeaderNode {
    HeaderNode::of_file(&source_file(text)).expect("file has a header node")
}

#[rstest]
#[case(QUALIFIED_HEADER, "a.b.c")]
#[case(SINGLE_SEGMENT_HEADER, "a")]
#[case(QUOTED_HEADER, "a.b-c.d")]
#[case(HEADER_WITH_COMMENTS, "a.b")]
#[case(NO_HEADER, "")]
fn test_fq_name(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(header(text).compute_fq_name(), FqName::new(expected));
}

#[test]
fn test_parent_segments_and_own_name() {
    let header = header(QUALIFIED_HEADER);
    let parents: Vec<_> = header
        .parent_segments()
        .iter()
        .map(|n| n.referenced_name())
        .collect();
    assert_eq!(parents, vec!["a", "b"]);
    assert_eq!(header.own_name(), "c");
    assert_eq!(header.name_identifier().map(|t| t.text().to_string()).as_deref(), Some("c"));
    assert!(!header.is_root());
}

#[test]
fn test_root_namespace() {
    let header = header(NO_HEADER);
    assert!(header.is_root());
    assert_eq!(header.own_name(), "");
    assert!(header.name_identifier().is_none());
    assert!(header.compute_fq_name().is_root());
}

#[test]
fn test_repeated_calls_compute_once() {
    let header = header(QUALIFIED_HEADER);
    let first = header.compute_fq_name();
    for _ in 0..5 {
        assert_eq!(header.compute_fq_name(), first);
    }
    assert_eq!(header.computation_count(), 1);

    header.invalidate_fq_name();
    assert_eq!(header.compute_fq_name(), first);
    assert_eq!(header.computation_count(), 2);
}

#[test]
fn test_edits_through_owner_are_seen() {
    let file = source_file(QUALIFIED_HEADER);
    let header = HeaderNode::for_update(&file).unwrap();
    assert_eq!(header.compute_fq_name().as_str(), "a.b.c");

    header.set_own_name("d").unwrap();
    assert_eq!(header.compute_fq_name().as_str(), "a.b.d");

    header.push_segment("e").unwrap();
    assert_eq!(header.compute_fq_name().as_str(), "a.b.d.e");
    assert_eq!(header.computation_count(), 3);

    header.replace_segments::<&str>(&[]).unwrap();
    assert!(header.is_root());
    assert!(header.compute_fq_name().is_root());
}

#[test]
fn test_parsed_headers_are_read_only() {
    let header = header(QUALIFIED_HEADER);
    assert!(header.set_own_name("x").is_err());
    assert_eq!(header.compute_fq_name().as_str(), "a.b.c");
}
