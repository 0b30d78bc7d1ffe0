//! Recursive descent parser for the decompiled source dialect
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source text into a CST
pub fn parse_source(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

const DECLARATION_START: &[SyntaxKind] = &[
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::OBJECT_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::ANNOTATION_KW,
    SyntaxKind::FUN_KW,
    SyntaxKind::VAL_KW,
    SyntaxKind::VAR_KW,
    SyntaxKind::CONSTRUCTOR_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::INTERNAL_KW,
    SyntaxKind::FINAL_KW,
    SyntaxKind::OPEN_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::EXTERNAL_KW,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Peek the next non-trivia token kind without consuming anything.
    fn peek_non_trivia(&self) -> SyntaxKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|t| t.kind)
            .find(|k| !k.is_trivia())
            .unwrap_or(SyntaxKind::ERROR)
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar: file level
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.skip_trivia();
        self.parse_namespace_header();
        self.skip_trivia();

        while self.at(SyntaxKind::IMPORT_KW) {
            self.parse_import();
            self.skip_trivia();
        }

        while !self.at_eof() {
            if self.at_any(DECLARATION_START) {
                self.parse_declaration();
            } else {
                self.error_recover("expected a declaration", DECLARATION_START);
            }
            self.skip_trivia();
        }
        self.finish_node();
    }

    /// `package a.b.c`; always produces a NAMESPACE_HEADER, empty for the root.
    fn parse_namespace_header(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_HEADER);
        if self.eat(SyntaxKind::PACKAGE_KW) {
            self.skip_trivia();
            self.parse_dotted_name_refs();
            self.eat_semicolon();
        }
        self.finish_node();
    }

    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DIRECTIVE);
        self.bump();
        self.skip_trivia();
        self.parse_dotted_name_refs();
        self.eat_semicolon();
        self.finish_node();
    }

    /// `a.b.c` as a flat sequence of NAME_REF nodes separated by DOT tokens.
    fn parse_dotted_name_refs(&mut self) {
        if !self.parse_name_ref() {
            return;
        }
        while self.peek_non_trivia() == SyntaxKind::DOT {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            if !self.parse_name_ref() {
                break;
            }
        }
    }

    fn parse_name_ref(&mut self) -> bool {
        if self.current_kind().is_name() {
            self.start_node(SyntaxKind::NAME_REF);
            self.bump();
            self.finish_node();
            true
        } else {
            self.error("expected a name");
            false
        }
    }

    fn parse_name(&mut self) {
        if self.current_kind().is_name() {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected a declaration name");
        }
    }

    fn eat_semicolon(&mut self) {
        if self.peek_non_trivia() == SyntaxKind::SEMICOLON {
            self.skip_trivia();
            self.bump();
        }
    }

    // =========================================================================
    // Grammar: declarations
    // =========================================================================

    fn parse_declaration(&mut self) {
        let checkpoint = self.builder.checkpoint();
        if self.current_kind().is_modifier() {
            self.start_node(SyntaxKind::MODIFIER_LIST);
            while self.current_kind().is_modifier() {
                self.bump();
                self.skip_trivia();
            }
            self.finish_node();
        }

        match self.current_kind() {
            SyntaxKind::CLASS_KW
            | SyntaxKind::INTERFACE_KW
            | SyntaxKind::OBJECT_KW
            | SyntaxKind::ENUM_KW
            | SyntaxKind::ANNOTATION_KW => {
                self.builder.start_node_at(checkpoint, SyntaxKind::CLASS.into());
                self.parse_class_rest();
                self.finish_node();
            }
            SyntaxKind::FUN_KW => {
                self.builder.start_node_at(checkpoint, SyntaxKind::FUN.into());
                self.parse_fun_rest();
                self.finish_node();
            }
            SyntaxKind::CONSTRUCTOR_KW => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::CONSTRUCTOR.into());
                self.parse_constructor_rest();
                self.finish_node();
            }
            SyntaxKind::VAL_KW | SyntaxKind::VAR_KW => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::PROPERTY.into());
                self.parse_property_rest();
                self.finish_node();
            }
            _ => {
                self.error_recover("expected class, fun, constructor, val or var", DECLARATION_START);
            }
        }
        self.eat_semicolon();
    }

    fn parse_class_rest(&mut self) {
        if self.at(SyntaxKind::ENUM_KW) || self.at(SyntaxKind::ANNOTATION_KW) {
            self.bump();
            self.skip_trivia();
        }
        if !(self.eat(SyntaxKind::CLASS_KW)
            || self.eat(SyntaxKind::INTERFACE_KW)
            || self.eat(SyntaxKind::OBJECT_KW))
        {
            self.error("expected class, interface or object");
        }
        self.skip_trivia();
        self.parse_name();

        if self.peek_non_trivia() == SyntaxKind::COLON {
            self.skip_trivia();
            self.start_node(SyntaxKind::SUPERTYPE_LIST);
            self.bump();
            self.skip_trivia();
            self.parse_type_ref();
            while self.peek_non_trivia() == SyntaxKind::COMMA {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.parse_type_ref();
            }
            self.finish_node();
        }

        if self.peek_non_trivia() == SyntaxKind::L_BRACE {
            self.skip_trivia();
            self.parse_class_body();
        }
    }

    fn parse_class_body(&mut self) {
        self.start_node(SyntaxKind::CLASS_BODY);
        self.bump();
        self.skip_trivia();
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            if self.at_any(DECLARATION_START) {
                self.parse_declaration();
            } else {
                let mut recovery = DECLARATION_START.to_vec();
                recovery.push(SyntaxKind::R_BRACE);
                self.error_recover("expected a member declaration", &recovery);
            }
            self.skip_trivia();
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_fun_rest(&mut self) {
        self.bump();
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();
        self.parse_param_list();
        if self.peek_non_trivia() == SyntaxKind::COLON {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_type_ref();
        }
        self.parse_optional_block();
    }

    fn parse_constructor_rest(&mut self) {
        self.bump();
        self.skip_trivia();
        self.parse_param_list();
        self.parse_optional_block();
    }

    fn parse_property_rest(&mut self) {
        self.bump();
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();
        if self.expect(SyntaxKind::COLON) {
            self.skip_trivia();
            self.parse_type_ref();
        }
    }

    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        if self.expect(SyntaxKind::L_PAREN) {
            self.skip_trivia();
            if !self.at(SyntaxKind::R_PAREN) {
                self.parse_param();
                while self.peek_non_trivia() == SyntaxKind::COMMA {
                    self.skip_trivia();
                    self.bump();
                    self.skip_trivia();
                    self.parse_param();
                }
                self.skip_trivia();
            }
            self.expect(SyntaxKind::R_PAREN);
        }
        self.finish_node();
    }

    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::PARAM);
        self.parse_name();
        self.skip_trivia();
        if self.expect(SyntaxKind::COLON) {
            self.skip_trivia();
            self.parse_type_ref();
        }
        self.finish_node();
    }

    /// `a.b.C<T, U>?`
    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);
        self.parse_dotted_name_refs();
        if self.peek_non_trivia() == SyntaxKind::LT {
            self.skip_trivia();
            self.start_node(SyntaxKind::TYPE_ARG_LIST);
            self.bump();
            self.skip_trivia();
            self.parse_type_ref();
            while self.peek_non_trivia() == SyntaxKind::COMMA {
                self.skip_trivia();
                self.bump();
                self.skip_trivia();
                self.parse_type_ref();
            }
            self.skip_trivia();
            self.expect(SyntaxKind::GT);
            self.finish_node();
        }
        if self.peek_non_trivia() == SyntaxKind::QUESTION {
            self.skip_trivia();
            self.bump();
        }
        self.finish_node();
    }

    /// `{ ... }` with balanced braces; contents are kept as raw tokens.
    fn parse_optional_block(&mut self) {
        if self.peek_non_trivia() != SyntaxKind::L_BRACE {
            return;
        }
        self.skip_trivia();
        self.start_node(SyntaxKind::BLOCK);
        self.bump();
        let mut depth = 1usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }
}
