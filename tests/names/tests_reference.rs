//! Segment resolution through an injected provider.

use clsview::FqName;
use clsview::names::{HeaderNode, NamespaceResolver, ReferenceProvider};
use clsview::parser::{AstNode, NameRef, SourceFile, parse_source};
use rustc_hash::FxHashSet;

/// Resolves to the qualified name when it is a known package.
struct KnownPackages(FxHashSet<&'static str>);

impl ReferenceProvider for KnownPackages {
    type Target = FqName;

    fn resolve_segment(&self, _segment: &NameRef, qualified: &FqName) -> Option<FqName> {
        self.0.contains(qualified.as_str()).then(|| qualified.clone())
    }
}

fn header(text: &str) -> HeaderNode {
    let file = SourceFile::cast(parse_source(text).syntax()).unwrap();
    HeaderNode::of_file(&file).unwrap()
}

#[test]
fn test_own_name_reference() {
    let resolver = NamespaceResolver::new(KnownPackages(["a", "a.b"].into_iter().collect()));
    assert_eq!(resolver.reference(&header("package a.b")), Some(FqName::new("a.b")));
    assert_eq!(resolver.reference(&header("package a.c")), None);
    assert_eq!(resolver.reference(&header("class Foo")), None);
}

#[test]
fn test_every_segment_is_resolved_with_its_prefix() {
    let resolver = NamespaceResolver::new(KnownPackages(["a", "a.b"].into_iter().collect()));
    let refs = resolver.segment_references(&header("package a.b.c"));
    let summary: Vec<_> = refs
        .iter()
        .map(|r| (r.segment.referenced_name().to_string(), r.qualified.to_string(), r.target.is_some()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a".to_string(), "a".to_string(), true),
            ("b".to_string(), "a.b".to_string(), true),
            ("c".to_string(), "a.b.c".to_string(), false),
        ]
    );
}

#[test]
fn test_closure_provider() {
    let resolver = NamespaceResolver::new(|segment: &NameRef, _: &FqName| {
        Some(segment.referenced_name().len())
    });
    assert_eq!(resolver.reference(&header("package alpha.be")), Some(2));
}
