//! Navigation tests for the IDE layer.

use std::sync::Arc;

use crate::helpers::class_fixtures::*;
use clsview::compiled::MemberKind;
use clsview::ide::{Navigation, resolve, try_resolve};
use clsview::parser::Declaration;

#[test]
fn test_method_navigates_to_its_declaration() {
    let unit = foo_unit();
    let element = unit.find_element(MemberKind::Method, "baz").unwrap();

    let Navigation::Declaration(target) = resolve(&element) else {
        panic!("baz should resolve");
    };
    assert_eq!(target.name, "baz");
    assert_eq!(&target.file().contents()[target.name_range], "baz");

    let Some(Declaration::Fun(fun)) = target.syntax() else {
        panic!("expected a function node");
    };
    let params: Vec<_> = fun
        .param_list()
        .map(|l| l.params().filter_map(|p| p.name_text()).collect())
        .unwrap_or_default();
    assert_eq!(params, vec!["x"]);
}

#[test]
fn test_span_points_at_the_name() {
    let unit = foo_unit();
    let element = unit.find_element(MemberKind::Method, "bar").unwrap();
    let navigation = resolve(&element);
    let target = navigation.target().unwrap();

    let line = target
        .file()
        .contents()
        .lines()
        .nth(target.span.start.line)
        .unwrap();
    let column = target.span.start.column;
    assert_eq!(&line[column..column + 3], "bar");
    assert_eq!(target.span.start.line, target.span.end.line);
}

#[test]
fn test_synthetic_accessor_is_unavailable() {
    let unit = foo_unit();
    let element = unit.find_element(MemberKind::Method, "access$bar$").unwrap();
    assert!(resolve(&element).is_unavailable());
    assert!(matches!(try_resolve(&element), Ok(Navigation::Unavailable)));
}

#[test]
fn test_every_element_resolves_without_panicking() {
    let unit = foo_unit();
    let resolved = unit
        .elements()
        .filter(|e| !resolve(e).is_unavailable())
        .count();
    // Type, constructor, bar, baz.
    assert_eq!(resolved, 4);
    assert_eq!(unit.build_count(), 1);
}

#[test]
fn test_targets_share_the_cached_data() {
    let unit = foo_unit();
    let bar = resolve(&unit.find_element(MemberKind::Method, "bar").unwrap());
    let baz = resolve(&unit.find_element(MemberKind::Method, "baz").unwrap());
    assert!(Arc::ptr_eq(bar.target().unwrap().data(), baz.target().unwrap().data()));
}

#[test]
fn test_broken_unit_is_unavailable() {
    let unit = broken_unit();
    let element = unit.element(0).unwrap();
    assert!(resolve(&element).is_unavailable());
    assert!(try_resolve(&element).is_err());
}

#[test]
fn test_navigation_runs_on_other_threads() {
    let unit = foo_unit();
    let handle = {
        let unit = Arc::clone(&unit);
        std::thread::spawn(move || {
            let element = unit.find_element(MemberKind::Method, "bar").unwrap();
            resolve(&element).target().map(|t| t.name.to_string())
        })
    };
    assert_eq!(handle.join().unwrap().as_deref(), Some("bar"));
}

#[test]
fn test_members_typed_with_kotlin_unit_class_resolve() {
    let unit = kotlin_unit_unit();
    for (kind, name) in [(MemberKind::Field, "INSTANCE"), (MemberKind::Method, "take")] {
        let element = unit.find_element(kind, name).unwrap();
        let target = resolve(&element).target().map(|t| t.name.to_string());
        assert_eq!(target.as_deref(), Some(name));
    }
}

#[test]
fn test_odd_member_name_leaves_siblings_navigable() {
    let unit = odd_names_unit();
    let bar = unit.find_element(MemberKind::Method, "bar").unwrap();
    assert!(matches!(try_resolve(&bar), Ok(Navigation::Declaration(_))));

    let odd = unit.find_element(MemberKind::Method, "we`ird").unwrap();
    assert!(matches!(try_resolve(&odd), Ok(Navigation::Unavailable)));
}
