use super::*;
use crate::parser::parse_source;

fn source_file(text: &str) -> SourceFile {
    let parsed = parse_source(text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    SourceFile::cast(parsed.syntax()).unwrap()
}

#[test]
fn test_ast_namespace_header_parts() {
    let root = source_file("package a.b.c");
    let header = root.namespace_header().unwrap();

    let all: Vec<_> = header.name_refs().map(|n| n.referenced_name()).collect();
    assert_eq!(all, vec!["a", "b", "c"]);
    assert_eq!(header.last_part().unwrap().referenced_name(), "c");

    let parents: Vec<_> = header
        .parent_parts()
        .into_iter()
        .map(|n| n.referenced_name())
        .collect();
    assert_eq!(parents, vec!["a", "b"]);
}

#[test]
fn test_ast_root_header_is_empty() {
    let root = source_file("class Foo");
    let header = root.namespace_header().unwrap();
    assert!(!header.has_package_keyword());
    assert!(header.last_part().is_none());
    assert!(header.parent_parts().is_empty());
}

#[test]
fn test_ast_quoted_names_are_stripped() {
    let root = source_file("package `my pkg`.inner\nfun `access$bar$`()");
    let header = root.namespace_header().unwrap();
    assert_eq!(header.name_refs().next().unwrap().referenced_name(), "my pkg");

    let Some(Declaration::Fun(fun)) = root.declarations().next() else {
        panic!("expected Fun");
    };
    assert_eq!(fun.name_text().unwrap(), "access$bar$");
}

#[test]
fn test_ast_class_members() {
    let root = source_file(
        "public final class Foo : a.Base, a.Iface {\n    private val count: kotlin.Int\n    public constructor(p0: kotlin.Int)\n    public static fun bar(x: kotlin.Int): kotlin.Int { /* compiled code */ }\n}\n",
    );

    let Some(Declaration::Class(class)) = root.declarations().next() else {
        panic!("expected Class");
    };
    assert_eq!(class.name_text().unwrap(), "Foo");
    assert_eq!(class.class_kind(), ClassKind::Class);
    let supertypes: Vec<_> = class.supertypes().iter().map(|t| t.path()).collect();
    assert_eq!(supertypes, vec!["a.Base", "a.Iface"]);

    let members = class.members();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0].name_text().unwrap(), "count");
    assert_eq!(members[1].name_text().unwrap(), "<init>");

    let Declaration::Fun(bar) = &members[2] else {
        panic!("expected Fun");
    };
    assert!(bar.modifiers().unwrap().has(SyntaxKind::STATIC_KW));
    assert!(bar.body().is_some());
    let params: Vec<_> = bar.param_list().unwrap().params().collect();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name_text().unwrap(), "x");
    assert_eq!(bar.return_type().unwrap().path(), "kotlin.Int");
}

#[test]
fn test_ast_class_kinds() {
    let root = source_file("interface A\nenum class B\nannotation class C\nobject D");
    let kinds: Vec<_> = root
        .declarations()
        .map(|d| match d {
            Declaration::Class(c) => c.class_kind(),
            _ => panic!("expected Class"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![ClassKind::Interface, ClassKind::Enum, ClassKind::Annotation, ClassKind::Object]
    );
}

#[test]
fn test_ast_generic_and_nullable_types() {
    let root = source_file("val xs: kotlin.Array<java.lang.String>?");
    let Some(Declaration::Property(prop)) = root.declarations().next() else {
        panic!("expected Property");
    };
    assert!(!prop.is_var());
    let ty = prop.type_ref().unwrap();
    assert_eq!(ty.path(), "kotlin.Array");
    assert!(ty.is_nullable());
    let args = ty.type_args();
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].path(), "java.lang.String");
}

#[test]
fn test_ast_all_declarations_in_source_order() {
    let root = source_file("class A {\n fun f()\n val g: kotlin.Int\n}\nfun h()");
    let names: Vec<_> = root
        .all_declarations()
        .filter_map(|d| d.name_text())
        .collect();
    assert_eq!(names, vec!["A", "f", "g", "h"]);
}
