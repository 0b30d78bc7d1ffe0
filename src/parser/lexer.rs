//! Logos-based lexer for the decompiled source dialect
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Ident,

    #[regex(r"`[^`\r\n]+`")]
    QuotedIdent,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token(";")]
    Semicolon,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("object")]
    ObjectKw,
    #[token("enum")]
    EnumKw,
    #[token("annotation")]
    AnnotationKw,
    #[token("fun")]
    FunKw,
    #[token("val")]
    ValKw,
    #[token("var")]
    VarKw,
    #[token("constructor")]
    ConstructorKw,
    #[token("public")]
    PublicKw,
    #[token("protected")]
    ProtectedKw,
    #[token("private")]
    PrivateKw,
    #[token("internal")]
    InternalKw,
    #[token("final")]
    FinalKw,
    #[token("open")]
    OpenKw,
    #[token("abstract")]
    AbstractKw,
    #[token("static")]
    StaticKw,
    #[token("external")]
    ExternalKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::QuotedIdent => SyntaxKind::QUOTED_IDENT,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::PackageKw => SyntaxKind::PACKAGE_KW,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::ClassKw => SyntaxKind::CLASS_KW,
            LogosToken::InterfaceKw => SyntaxKind::INTERFACE_KW,
            LogosToken::ObjectKw => SyntaxKind::OBJECT_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::AnnotationKw => SyntaxKind::ANNOTATION_KW,
            LogosToken::FunKw => SyntaxKind::FUN_KW,
            LogosToken::ValKw => SyntaxKind::VAL_KW,
            LogosToken::VarKw => SyntaxKind::VAR_KW,
            LogosToken::ConstructorKw => SyntaxKind::CONSTRUCTOR_KW,
            LogosToken::PublicKw => SyntaxKind::PUBLIC_KW,
            LogosToken::ProtectedKw => SyntaxKind::PROTECTED_KW,
            LogosToken::PrivateKw => SyntaxKind::PRIVATE_KW,
            LogosToken::InternalKw => SyntaxKind::INTERNAL_KW,
            LogosToken::FinalKw => SyntaxKind::FINAL_KW,
            LogosToken::OpenKw => SyntaxKind::OPEN_KW,
            LogosToken::AbstractKw => SyntaxKind::ABSTRACT_KW,
            LogosToken::StaticKw => SyntaxKind::STATIC_KW,
            LogosToken::ExternalKw => SyntaxKind::EXTERNAL_KW,
        }
    }
}
