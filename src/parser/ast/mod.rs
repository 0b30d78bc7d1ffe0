//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for declaration syntax.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

// ============================================================================
// Helper utilities for reducing code duplication
// ============================================================================

/// Strip surrounding backticks from quoted names like `` `access$bar$` ``.
#[inline]
pub(crate) fn strip_backticks(text: &str) -> &str {
    if text.len() > 1 && text.starts_with('`') && text.ends_with('`') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Find the first token that can be used as a name.
#[inline]
fn find_name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind().is_name())
}

/// Macro to generate boolean property methods that check for a specific token kind.
macro_rules! has_token_method {
    ($name:ident, $kind:ident) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token.")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate the `name_text()` accessor for nodes owning a `Name` child.
macro_rules! name_text_method {
    () => {
        /// Declared name with backticks stripped.
        pub fn name_text(&self) -> Option<SmolStr> {
            self.name().and_then(|n| n.text())
        }
    };
}

/// Trait for typed AST nodes
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn token(&self) -> Option<SyntaxToken> {
        find_name_token(&self.0)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.token().map(|t| SmolStr::new(strip_backticks(t.text())))
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn token(&self) -> Option<SyntaxToken> {
        find_name_token(&self.0)
    }

    /// The referenced name with backticks stripped; empty if the token is missing.
    pub fn referenced_name(&self) -> SmolStr {
        self.token()
            .map(|t| SmolStr::new(strip_backticks(t.text())))
            .unwrap_or_default()
    }

    /// Whether the name is written in backticks.
    pub fn is_quoted(&self) -> bool {
        self.token().is_some_and(|t| t.kind() == SyntaxKind::QUOTED_IDENT)
    }
}

// Submodules are declared after the macros so macro_rules! are in scope
mod declarations;
mod namespace;

// Re-export all public types so external code sees a flat namespace
pub use self::declarations::*;
pub use self::namespace::*;

#[cfg(test)]
mod tests;
