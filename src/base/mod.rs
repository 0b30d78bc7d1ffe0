//! Foundation types for the clsview toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FqName`] - Dot-qualified namespace names
//! - [`Position`], [`Span`] - Line/column positions inside synthesized files
//! - [`TextRange`], [`TextSize`] - Byte offsets (re-exported from `text-size`)
//!
//! This module has NO dependencies on other clsview modules.

mod fq_name;
mod position;

pub use fq_name::FqName;
pub use position::{Position, Span};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
