//! Synthesized source files.

use rowan::GreenNode;
use smol_str::SmolStr;
use text_size::TextRange;

use super::DecompilationError;
use super::types::erase_type_ref;
use crate::compiled::MemberKind;
use crate::parser::{
    AstNode, Declaration, ParamList, SourceFile, SyntaxKind, SyntaxNode, SyntaxNodePtr,
    parse_source,
};

/// Index of a declaration within its [`DecompiledUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub(crate) usize);

impl DeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A declaration found in the synthesized tree, keyed the way compiled
/// members are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationInfo {
    ptr: SyntaxNodePtr,
    name_range: TextRange,
    pub kind: MemberKind,
    pub name: SmolStr,
    /// Erased signature recomputed from the declaration's type references.
    pub signature: SmolStr,
}

impl DeclarationInfo {
    /// Range of the whole declaration.
    pub fn range(&self) -> TextRange {
        self.ptr.text_range()
    }

    /// Range of the declared name, or of the `constructor` keyword.
    pub fn name_range(&self) -> TextRange {
        self.name_range
    }
}

/// Pseudo-source text for one compiled class plus its parsed tree.
///
/// The tree is kept as a green node so the unit can be shared across
/// threads; [`syntax`](Self::syntax) builds a thread-local view on demand.
#[derive(Debug, Clone)]
pub struct DecompiledUnit {
    file_name: SmolStr,
    text: String,
    green: GreenNode,
    declarations: Vec<DeclarationInfo>,
}

impl DecompiledUnit {
    pub(crate) fn from_text(
        class: &str,
        file_name: impl Into<SmolStr>,
        text: String,
    ) -> Result<Self, DecompilationError> {
        let parse = parse_source(&text);
        if let Some(error) = parse.errors.first() {
            return Err(DecompilationError::syntax(
                class,
                format!(
                    "{} at {:?} ({} errors)",
                    error.message,
                    error.range,
                    parse.errors.len()
                ),
            ));
        }

        let root = parse.syntax();
        let file = SourceFile::cast(root)
            .ok_or_else(|| DecompilationError::structural_mismatch(class, "root is not a source file"))?;
        let declarations = file
            .all_declarations()
            .map(|decl| declaration_info(class, &decl))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            file_name: file_name.into(),
            text,
            green: parse.green,
            declarations,
        })
    }

    /// Synthetic file name, `<SimpleName>.kt`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Decompiled units never exist on disk.
    pub fn is_physical(&self) -> bool {
        false
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh root node over the synthesized tree.
    pub fn syntax(&self) -> SourceFile {
        SourceFile(SyntaxNode::new_root(self.green.clone()))
    }

    pub fn declarations(&self) -> &[DeclarationInfo] {
        &self.declarations
    }

    pub fn declaration(&self, id: DeclId) -> Option<&DeclarationInfo> {
        self.declarations.get(id.0)
    }

    pub fn decl_ids(&self) -> impl Iterator<Item = DeclId> + '_ {
        (0..self.declarations.len()).map(DeclId)
    }

    /// The declaration's node in a tree rooted at `root`, which must come
    /// from [`syntax`](Self::syntax) of this unit.
    pub fn declaration_node(&self, root: &SourceFile, id: DeclId) -> Option<Declaration> {
        let info = self.declaration(id)?;
        info.ptr.try_to_node(root.syntax()).and_then(Declaration::cast)
    }
}

fn declaration_info(class: &str, decl: &Declaration) -> Result<DeclarationInfo, DecompilationError> {
    let mismatch = |message: String| {
        let error = DecompilationError::structural_mismatch(class, message);
        tracing::error!(%error, "synthesized declaration cannot be indexed");
        error
    };

    let name = decl
        .name_text()
        .ok_or_else(|| mismatch(format!("declaration without a name at {:?}", decl.syntax().text_range())))?;

    let (kind, signature, name_range) = match decl {
        Declaration::Class(class_decl) => (
            MemberKind::Type,
            SmolStr::default(),
            class_decl.name().map(|n| n.syntax().text_range()),
        ),
        Declaration::Fun(fun) => (
            MemberKind::Method,
            erase_params(fun.param_list()).ok_or_else(|| mismatch(format!("unerasable parameters of {}", name)))?,
            fun.name().map(|n| n.syntax().text_range()),
        ),
        Declaration::Constructor(ctor) => (
            MemberKind::Method,
            erase_params(ctor.param_list()).ok_or_else(|| mismatch("unerasable constructor parameters".to_string()))?,
            ctor.syntax()
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| t.kind() == SyntaxKind::CONSTRUCTOR_KW)
                .map(|t| t.text_range()),
        ),
        Declaration::Property(property) => (
            MemberKind::Field,
            property
                .type_ref()
                .and_then(|t| erase_type_ref(&t))
                .map(SmolStr::from)
                .ok_or_else(|| mismatch(format!("unerasable type of {}", name)))?,
            property.name().map(|n| n.syntax().text_range()),
        ),
    };

    Ok(DeclarationInfo {
        ptr: SyntaxNodePtr::new(decl.syntax()),
        name_range: name_range.unwrap_or_else(|| decl.syntax().text_range()),
        kind,
        name,
        signature,
    })
}

fn erase_params(params: Option<ParamList>) -> Option<SmolStr> {
    let mut signature = String::from("(");
    for param in params?.params() {
        signature.push_str(&erase_type_ref(&param.type_ref()?)?);
    }
    signature.push(')');
    Some(SmolStr::from(signature))
}
