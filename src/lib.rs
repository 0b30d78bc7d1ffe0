//! # clsview-base
//!
//! Core library for viewing compiled classes as source: namespace names,
//! decompiled pseudo-source synthesis, member-to-declaration mapping and
//! navigation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide         → Navigation from compiled members to declarations
//!   ↓
//! decompiler  → Synthesized units, mapping index, build-once cache
//!   ↓
//! compiled    → Compiled units, members, member keys
//!   ↓
//! classfile   → Class file reader/writer, descriptors
//!   ↓
//! names       → Namespace headers with memoized FqNames
//!   ↓
//! parser      → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base        → Primitives (FqName, Position/Span, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → names → classfile → compiled → decompiler → ide)
// ============================================================================

/// Foundation types: FqName, Position/Span, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Namespace headers and their fully-qualified names
pub mod names;

/// JVM class files: reader, writer, descriptors
pub mod classfile;

/// Compiled units and their members
pub mod compiled;

/// Decompiled units, mapping index, cached decompiled data
pub mod decompiler;

/// IDE features: navigation to decompiled declarations
pub mod ide;

// Re-export foundation types
pub use base::{FqName, Position, Span, TextRange, TextSize};

// Re-export the main entry points
pub use compiled::{CompiledElement, CompiledMember, CompiledUnit, MemberKey, MemberKind};
pub use decompiler::{DecompilationError, DecompiledData, DecompiledUnit, Mapping, MappingIndex, get_decompiled_data};
pub use ide::{Navigation, NavigationTarget, resolve};
pub use names::{HeaderNode, NamespaceResolver, ReferenceProvider};
