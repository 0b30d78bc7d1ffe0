//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the declaration-level source dialect that decompiled units are
//! rendered in.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (namespace header, classes, functions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,        // identifier
    QUOTED_IDENT, // `access$get`

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_PAREN,   // (
    R_PAREN,   // )
    LT,        // <
    GT,        // >
    COMMA,     // ,
    COLON,     // :
    DOT,       // .
    QUESTION,  // ?
    SEMICOLON, // ;

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    PACKAGE_KW,
    IMPORT_KW,
    CLASS_KW,
    INTERFACE_KW,
    OBJECT_KW,
    ENUM_KW,
    ANNOTATION_KW,
    FUN_KW,
    VAL_KW,
    VAR_KW,
    CONSTRUCTOR_KW,
    PUBLIC_KW,
    PROTECTED_KW,
    PRIVATE_KW,
    INTERNAL_KW,
    FINAL_KW,
    OPEN_KW,
    ABSTRACT_KW,
    STATIC_KW,
    EXTERNAL_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    NAMESPACE_HEADER,
    IMPORT_DIRECTIVE,
    NAME_REF,
    NAME,
    MODIFIER_LIST,
    CLASS,
    SUPERTYPE_LIST,
    CLASS_BODY,
    FUN,
    CONSTRUCTOR,
    PROPERTY,
    PARAM_LIST,
    PARAM,
    TYPE_REF,
    TYPE_ARG_LIST,
    BLOCK,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PACKAGE_KW as u16) && (self as u16) <= (Self::EXTERNAL_KW as u16)
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        (self as u16) >= (Self::PUBLIC_KW as u16) && (self as u16) <= (Self::EXTERNAL_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::SEMICOLON as u16)
    }

    /// Check if this token can name a declaration or a reference
    pub fn is_name(self) -> bool {
        matches!(self, Self::IDENT | Self::QUOTED_IDENT)
    }

    /// Keyword kind for an identifier-shaped text, if it is reserved.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "package" => Self::PACKAGE_KW,
            "import" => Self::IMPORT_KW,
            "class" => Self::CLASS_KW,
            "interface" => Self::INTERFACE_KW,
            "object" => Self::OBJECT_KW,
            "enum" => Self::ENUM_KW,
            "annotation" => Self::ANNOTATION_KW,
            "fun" => Self::FUN_KW,
            "val" => Self::VAL_KW,
            "var" => Self::VAR_KW,
            "constructor" => Self::CONSTRUCTOR_KW,
            "public" => Self::PUBLIC_KW,
            "protected" => Self::PROTECTED_KW,
            "private" => Self::PRIVATE_KW,
            "internal" => Self::INTERNAL_KW,
            "final" => Self::FINAL_KW,
            "open" => Self::OPEN_KW,
            "abstract" => Self::ABSTRACT_KW,
            "static" => Self::STATIC_KW,
            "external" => Self::EXTERNAL_KW,
            _ => return None,
        };
        Some(kind)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClsLanguage {}

impl rowan::Language for ClsLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ClsLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ClsLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ClsLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<ClsLanguage>;
