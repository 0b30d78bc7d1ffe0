//! Class file fixtures built with [`ClassFileBuilder`].

use std::sync::Arc;

use clsview::classfile::{AccessFlags, ClassFileBuilder};
use clsview::compiled::{CompiledMember, CompiledUnit};

/// `a.b.Foo` with `bar(): Int`, `baz(x: Int): Int` and the synthetic
/// accessor `access$bar$` a compiler emits for private access.
pub fn foo_bytes() -> Vec<u8> {
    ClassFileBuilder::new("a/b/Foo")
        .access(AccessFlags::PUBLIC | AccessFlags::FINAL | AccessFlags::SUPER)
        .method(AccessFlags::PUBLIC, "<init>", "()V")
        .method(AccessFlags::PRIVATE, "bar", "()I")
        .method_with_params(AccessFlags::PUBLIC, "baz", "(I)I", &["x"])
        .method(
            AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL | AccessFlags::SYNTHETIC,
            "access$bar$",
            "(La/b/Foo;)I",
        )
        .source_file("Foo.kt")
        .build()
}

pub fn foo_unit() -> Arc<CompiledUnit> {
    Arc::new(CompiledUnit::from_class_bytes(foo_bytes()).expect("valid class file"))
}

/// A covariant override pair: `foo(): Object` and `foo(): String`, both
/// with the erased signature `()`.
pub fn covariant_bytes() -> Vec<u8> {
    ClassFileBuilder::new("a/Cov")
        .method(AccessFlags::PUBLIC, "foo", "()Ljava/lang/Object;")
        .method(AccessFlags::PUBLIC, "foo", "()Ljava/lang/String;")
        .build()
}

pub fn covariant_unit() -> Arc<CompiledUnit> {
    Arc::new(CompiledUnit::from_class_bytes(covariant_bytes()).expect("valid class file"))
}

/// The covariant pair with its member list given in reverse order.
pub fn covariant_unit_reversed() -> Arc<CompiledUnit> {
    Arc::new(CompiledUnit::new(
        "a/Cov",
        covariant_bytes(),
        vec![
            CompiledMember::type_member("Cov", AccessFlags::PUBLIC | AccessFlags::SUPER),
            CompiledMember::method("foo", "()Ljava/lang/String;", AccessFlags::PUBLIC),
            CompiledMember::method("foo", "()Ljava/lang/Object;", AccessFlags::PUBLIC),
        ],
    ))
}

/// A unit whose bytes are not a class file.
pub fn broken_unit() -> Arc<CompiledUnit> {
    Arc::new(CompiledUnit::new(
        "a/Broken",
        vec![0xCA, 0xFE, 0xBA],
        vec![CompiledMember::type_member("Broken", AccessFlags::PUBLIC)],
    ))
}

/// `kotlin.Unit` itself: its members refer to the class `kotlin/Unit`,
/// which reads like the builtin `Unit` type.
pub fn kotlin_unit_unit() -> Arc<CompiledUnit> {
    let bytes = ClassFileBuilder::new("kotlin/Unit")
        .access(AccessFlags::PUBLIC | AccessFlags::FINAL | AccessFlags::SUPER)
        .field(
            AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL,
            "INSTANCE",
            "Lkotlin/Unit;",
        )
        .method(AccessFlags::PUBLIC, "take", "(Lkotlin/Unit;)V")
        .method(AccessFlags::PUBLIC, "count", "(Lkotlin/Int;[Lkotlin/IntArray;)I")
        .build();
    Arc::new(CompiledUnit::from_class_bytes(bytes).expect("valid class file"))
}

/// `a.Foo` with `bar(): Int` next to members whose names cannot be
/// written as source.
pub fn odd_names_unit() -> Arc<CompiledUnit> {
    let bytes = ClassFileBuilder::new("a/Foo")
        .method(AccessFlags::PUBLIC, "bar", "()I")
        .method(AccessFlags::PUBLIC, "we`ird", "()I")
        .method(AccessFlags::PUBLIC, "line\nbreak", "()V")
        .field(AccessFlags::PUBLIC, "x", "La/We`ird;")
        .build();
    Arc::new(CompiledUnit::from_class_bytes(bytes).expect("valid class file"))
}
