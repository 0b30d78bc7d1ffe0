//! Synthesized pseudo-source.

use crate::helpers::class_fixtures::*;
use clsview::classfile::ClassFileError;
use clsview::compiled::CompiledUnit;
use clsview::decompiler::{DecompilationError, synthesize};
use clsview::parser::AstNode;

#[test]
fn test_same_bytes_same_text() {
    let a = synthesize(&foo_unit()).unwrap();
    let b = synthesize(&foo_unit()).unwrap();
    assert_eq!(a.contents(), b.contents());
    assert_eq!(a.green(), b.green());
}

#[test]
fn test_signatures_only() {
    let decompiled = synthesize(&foo_unit()).unwrap();
    let text = decompiled.contents();
    assert!(text.contains("package a.b\n"));
    assert!(text.contains("public final class Foo {"));
    assert!(text.contains("private fun bar(): kotlin.Int { /* compiled code */ }"));
    assert!(text.contains("public fun baz(x: kotlin.Int): kotlin.Int { /* compiled code */ }"));
    assert!(!text.contains("access$bar$"));
}

#[test]
fn test_tree_is_lossless() {
    let decompiled = synthesize(&foo_unit()).unwrap();
    let root = decompiled.syntax();
    assert_eq!(root.syntax().text().to_string(), decompiled.contents());
    assert_eq!(
        root.namespace_header().map(|h| h.name_refs().count()),
        Some(2)
    );
}

#[test]
fn test_synthetic_file() {
    let decompiled = synthesize(&foo_unit()).unwrap();
    assert_eq!(decompiled.file_name(), "Foo.kt");
    assert!(!decompiled.is_physical());
}

#[test]
fn test_truncated_bytes() {
    let bytes = foo_bytes();
    let unit = CompiledUnit::new("a/b/Foo", bytes[..bytes.len() / 2].to_vec(), Vec::new());
    assert!(matches!(
        synthesize(&unit),
        Err(DecompilationError::ClassFile(ClassFileError::Truncated { .. }))
    ));
}

#[test]
fn test_not_a_class_file() {
    assert!(matches!(
        CompiledUnit::from_class_bytes(b"PK\x03\x04 not a class".to_vec()),
        Err(ClassFileError::BadMagic(_))
    ));
}
