//! Error types for class file reading.

use thiserror::Error;

/// Errors that can occur while reading a class file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassFileError {
    /// Input ended before a structure was complete.
    #[error("class file truncated at offset {offset}: needed {needed} more bytes")]
    Truncated { offset: usize, needed: usize },

    /// Input does not start with `0xCAFEBABE`.
    #[error("not a class file: bad magic {0:#010x}")]
    BadMagic(u32),

    /// Constant pool index out of range or pointing at the second slot of a wide entry.
    #[error("invalid constant pool index {0}")]
    BadConstantIndex(u16),

    /// Unknown constant pool tag.
    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownConstantTag { tag: u8, index: u16 },

    /// Constant pool entry of the wrong kind.
    #[error("constant pool index {index}: expected {expected}")]
    UnexpectedConstant { index: u16, expected: &'static str },

    /// Malformed modified UTF-8 in a `CONSTANT_Utf8` entry.
    #[error("invalid modified UTF-8 in constant pool index {0}")]
    InvalidUtf8(u16),

    /// Malformed field or method descriptor.
    #[error("invalid descriptor {descriptor:?}: {message}")]
    InvalidDescriptor { descriptor: String, message: String },

    /// Bytes left over after the last structure.
    #[error("{0} trailing bytes after class file")]
    TrailingBytes(usize),
}

impl ClassFileError {
    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(descriptor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected constant error.
    pub fn unexpected_constant(index: u16, expected: &'static str) -> Self {
        Self::UnexpectedConstant { index, expected }
    }
}
