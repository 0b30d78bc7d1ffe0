//! Namespace headers with a memoized fully-qualified name.

use std::cell::{Cell, RefCell};

use rowan::NodeOrToken;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::FqName;
use crate::parser::{
    AstNode, NameRef, NamespaceHeader, SourceFile, SyntaxElement, SyntaxKind, SyntaxToken,
    parse_source,
};

/// Errors raised by structural edits on a [`HeaderNode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderEditError {
    /// The header belongs to an immutable tree; see [`HeaderNode::for_update`].
    #[error("namespace header is not part of a mutable tree")]
    Immutable,

    /// The replacement segment does not lex as a single name.
    #[error("invalid namespace segment: {0:?}")]
    InvalidSegment(String),
}

/// A namespace header together with its cached [`FqName`].
///
/// The cache is an owned field. Edits made through [`set_own_name`],
/// [`push_segment`] and [`replace_segments`] invalidate it; edits made to the
/// underlying tree by other means must call [`invalidate_fq_name`], otherwise
/// [`compute_fq_name`] keeps returning the name seen at first computation.
///
/// Like the rowan nodes it wraps, a `HeaderNode` is thread-confined.
///
/// [`set_own_name`]: HeaderNode::set_own_name
/// [`push_segment`]: HeaderNode::push_segment
/// [`replace_segments`]: HeaderNode::replace_segments
/// [`invalidate_fq_name`]: HeaderNode::invalidate_fq_name
/// [`compute_fq_name`]: HeaderNode::compute_fq_name
#[derive(Debug)]
pub struct HeaderNode {
    syntax: NamespaceHeader,
    mutable: bool,
    fq_name: RefCell<Option<FqName>>,
    computations: Cell<usize>,
}

impl HeaderNode {
    pub fn new(syntax: NamespaceHeader) -> Self {
        Self {
            syntax,
            mutable: false,
            fq_name: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    /// The header of a parsed file.
    pub fn of_file(file: &SourceFile) -> Option<Self> {
        file.namespace_header().map(Self::new)
    }

    /// The header of a mutable copy of `file`, so that edits are allowed.
    pub fn for_update(file: &SourceFile) -> Option<Self> {
        let root = file.syntax().clone_for_update();
        let syntax = SourceFile::cast(root)?.namespace_header()?;
        Some(Self {
            mutable: true,
            ..Self::new(syntax)
        })
    }

    pub fn syntax(&self) -> &NamespaceHeader {
        &self.syntax
    }

    /// Qualifier segments, all but the last.
    pub fn parent_segments(&self) -> Vec<NameRef> {
        self.syntax.parent_parts()
    }

    /// The segment naming this namespace.
    pub fn last_part(&self) -> Option<NameRef> {
        self.syntax.last_part()
    }

    pub fn name_identifier(&self) -> Option<SyntaxToken> {
        self.last_part().and_then(|n| n.token())
    }

    /// The header's own name, `""` for the root namespace.
    pub fn own_name(&self) -> SmolStr {
        self.last_part()
            .map(|n| n.referenced_name())
            .unwrap_or_default()
    }

    pub fn segment_texts(&self) -> Vec<SmolStr> {
        self.syntax.name_refs().map(|n| n.referenced_name()).collect()
    }

    pub fn is_root(&self) -> bool {
        self.own_name().is_empty()
    }

    /// The fully-qualified name, computed on first call and cached.
    pub fn compute_fq_name(&self) -> FqName {
        if let Some(cached) = self.fq_name.borrow().as_ref() {
            return cached.clone();
        }

        let mut segments: Vec<SmolStr> = self
            .parent_segments()
            .iter()
            .map(|n| n.referenced_name())
            .collect();
        segments.push(self.own_name());
        let computed = FqName::from_segments(segments);

        self.computations.set(self.computations.get() + 1);
        tracing::trace!(fq_name = %computed, "computed namespace fq name");
        *self.fq_name.borrow_mut() = Some(computed.clone());
        computed
    }

    /// How many times the name has been computed rather than served from cache.
    pub fn computation_count(&self) -> usize {
        self.computations.get()
    }

    /// Drop the cached name; the next [`compute_fq_name`](Self::compute_fq_name) recomputes.
    pub fn invalidate_fq_name(&self) {
        if self.fq_name.borrow_mut().take().is_some() {
            tracing::trace!("invalidated namespace fq name");
        }
    }

    /// Rename the last segment, or add one to a root header.
    pub fn set_own_name(&self, name: &str) -> Result<(), HeaderEditError> {
        let mut segments = self.segment_texts();
        match segments.last_mut() {
            Some(last) => *last = SmolStr::new(name),
            None => segments.push(SmolStr::new(name)),
        }
        self.replace_segments(&segments)
    }

    /// Append a segment, making the current name a qualifier.
    pub fn push_segment(&self, name: &str) -> Result<(), HeaderEditError> {
        let mut segments = self.segment_texts();
        segments.push(SmolStr::new(name));
        self.replace_segments(&segments)
    }

    /// Rewrite the header to exactly `segments`; an empty slice makes it the root.
    pub fn replace_segments<S: AsRef<str>>(&self, segments: &[S]) -> Result<(), HeaderEditError> {
        if !self.mutable {
            return Err(HeaderEditError::Immutable);
        }

        let replacement = header_elements(segments)?;
        let node = self.syntax.syntax();
        let existing = node.children_with_tokens().count();
        node.splice_children(0..existing, replacement);
        self.invalidate_fq_name();
        Ok(())
    }
}

/// Parse `package <segments>` on its own and detach the header's children for splicing.
fn header_elements<S: AsRef<str>>(segments: &[S]) -> Result<Vec<SyntaxElement>, HeaderEditError> {
    if segments.is_empty() {
        return Ok(Vec::new());
    }

    let mut rendered = Vec::with_capacity(segments.len());
    for segment in segments {
        let segment = segment.as_ref();
        let quoted = crate::decompiler::quote_name(segment)
            .ok_or_else(|| HeaderEditError::InvalidSegment(segment.to_string()))?;
        rendered.push(quoted);
    }

    let parse = parse_source(&format!("package {}", rendered.join(".")));
    let snippet = parse.syntax().clone_for_update();
    let header = snippet
        .children()
        .find(|n| n.kind() == SyntaxKind::NAMESPACE_HEADER)
        .ok_or_else(|| HeaderEditError::InvalidSegment(rendered.join(".")))?;

    let name_refs = header
        .children()
        .filter(|n| n.kind() == SyntaxKind::NAME_REF)
        .count();
    if !parse.ok() || name_refs != segments.len() {
        return Err(HeaderEditError::InvalidSegment(rendered.join(".")));
    }

    let elements: Vec<SyntaxElement> = header.children_with_tokens().collect();
    for element in &elements {
        match element {
            NodeOrToken::Node(node) => node.detach(),
            NodeOrToken::Token(token) => token.detach(),
        }
    }
    Ok(elements)
}
