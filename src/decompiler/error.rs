//! Error types for decompilation.

use thiserror::Error;

use crate::classfile::ClassFileError;

/// Errors that can occur while building decompiled data for a unit.
///
/// None of these leave anything cached: the caller that triggered the build
/// gets the error and a later call builds again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompilationError {
    /// The unit's bytes could not be read.
    #[error(transparent)]
    ClassFile(#[from] ClassFileError),

    /// The synthesized text did not parse cleanly.
    #[error("synthesized text for {class} failed to parse: {message}")]
    Syntax { class: String, message: String },

    /// A synthesized declaration has a shape the mapping cannot use.
    #[error("unexpected declaration shape in {class}: {message}")]
    StructuralMismatch { class: String, message: String },
}

impl DecompilationError {
    /// Create a syntax error.
    pub fn syntax(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Create a structural mismatch error.
    pub fn structural_mismatch(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            class: class.into(),
            message: message.into(),
        }
    }
}
