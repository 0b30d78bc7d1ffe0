//! Common source code fixtures for tests.

pub const QUALIFIED_HEADER: &str = "package a.b.c\n\nclass Foo\n";
pub const SINGLE_SEGMENT_HEADER: &str = "package a\n";
pub const NO_HEADER: &str = "class Foo\n";
pub const QUOTED_HEADER: &str = "package a.`b-c`.d\n";
pub const HEADER_WITH_COMMENTS: &str = "// leading\npackage a /* inner */ . b\n";
