//! Mapping compiled members to synthesized declarations.

use crate::helpers::class_fixtures::*;
use clsview::compiled::MemberKind;
use clsview::decompiler::{Mapping, get_decompiled_data};

#[test]
fn test_every_member_has_an_outcome() {
    let unit = foo_unit();
    let data = get_decompiled_data(&unit).unwrap();
    for member in unit.members() {
        assert!(
            data.index().lookup(&unit, member).is_some(),
            "no entry for {}",
            member.name
        );
    }
}

#[test]
fn test_members_map_to_matching_declarations() {
    let unit = foo_unit();
    let data = get_decompiled_data(&unit).unwrap();

    for (name, signature) in [("bar", "()"), ("baz", "(I)"), ("<init>", "()")] {
        let element = unit.find_element(MemberKind::Method, name).unwrap();
        let info = data
            .declaration_for(&unit, element.member())
            .unwrap_or_else(|| panic!("{name} should map"));
        assert_eq!(info.name, name);
        assert_eq!(info.signature, signature);
        assert_eq!(info.kind, MemberKind::Method);
    }

    let class = unit.find_element(MemberKind::Type, "Foo").unwrap();
    assert_eq!(data.declaration_for(&unit, class.member()).map(|d| d.kind), Some(MemberKind::Type));
}

#[test]
fn test_synthetic_accessor_has_no_declaration() {
    let unit = foo_unit();
    let data = get_decompiled_data(&unit).unwrap();
    let accessor = unit.find_element(MemberKind::Method, "access$bar$").unwrap();
    assert_eq!(
        data.index().lookup(&unit, accessor.member()),
        Some(Mapping::NoDeclaration)
    );
}

#[test]
fn test_equal_keys_pair_by_order() {
    let unit = covariant_unit();
    let data = get_decompiled_data(&unit).unwrap();

    let ids: Vec<_> = unit.members()[1..]
        .iter()
        .map(|m| data.index().lookup(&unit, m).and_then(Mapping::declaration).unwrap())
        .collect();
    assert_ne!(ids[0], ids[1]);
    assert!(ids[0] < ids[1], "first member takes the first declaration");

    // The first declaration in the text is the one rendered from `foo(): Object`.
    let text = data.unit().contents();
    let first = data.unit().declaration(ids[0]).unwrap();
    assert!(text[first.range()].contains("java.lang.Object"));
}

#[test]
fn test_equal_keys_follow_member_list_order() {
    let unit = covariant_unit_reversed();
    let data = get_decompiled_data(&unit).unwrap();

    // Members: Type, foo(): String, foo(): Object. Parity pairs the first
    // listed member with the first declaration, whatever its return type.
    let string_foo = &unit.members()[1];
    let id = data.index().lookup(&unit, string_foo).and_then(Mapping::declaration).unwrap();
    let text = data.unit().contents();
    assert!(text[data.unit().declaration(id).unwrap().range()].contains("java.lang.Object"));
}

#[test]
fn test_builtin_lookalike_types_map_to_their_declarations() {
    let unit = kotlin_unit_unit();
    let data = get_decompiled_data(&unit).unwrap();

    let expected = [
        (MemberKind::Field, "INSTANCE", "Lkotlin/Unit;"),
        (MemberKind::Method, "take", "(Lkotlin/Unit;)"),
        (MemberKind::Method, "count", "(Lkotlin/Int;[Lkotlin/IntArray;)"),
    ];
    for (kind, name, signature) in expected {
        let element = unit.find_element(kind, name).unwrap();
        let info = data
            .declaration_for(&unit, element.member())
            .unwrap_or_else(|| panic!("{name} should map"));
        assert_eq!(info.signature, signature);
    }
}

#[test]
fn test_unwritable_names_do_not_break_the_class() {
    let unit = odd_names_unit();
    let data = get_decompiled_data(&unit).unwrap();

    let bar = unit.find_element(MemberKind::Method, "bar").unwrap();
    assert_eq!(data.declaration_for(&unit, bar.member()).map(|d| d.name.as_str()), Some("bar"));

    for (kind, name) in [
        (MemberKind::Method, "we`ird"),
        (MemberKind::Method, "line\nbreak"),
        (MemberKind::Field, "x"),
    ] {
        let element = unit.find_element(kind, name).unwrap();
        assert_eq!(data.index().lookup(&unit, element.member()), Some(Mapping::NoDeclaration));
    }
}
