//! JVM class file reading and writing.
//!
//! The reader covers what declaration synthesis needs. The writer produces
//! small class files for fixtures and tooling.

mod access;
mod descriptor;
mod error;
mod reader;
mod writer;

pub use access::AccessFlags;
pub use descriptor::{BaseType, FieldType, MethodDescriptor};
pub use error::ClassFileError;
pub use reader::{ClassFile, MemberInfo, simple_name};
pub use writer::ClassFileBuilder;
