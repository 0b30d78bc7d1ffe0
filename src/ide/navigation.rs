//! Navigation from compiled members to their decompiled declarations.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{Span, TextRange};
use crate::compiled::{CompiledElement, MemberKind};
use crate::decompiler::{DeclId, DecompilationError, DecompiledData, DecompiledUnit, get_decompiled_data};
use crate::parser::Declaration;

/// Result of a navigation request.
#[derive(Clone, Debug)]
pub enum Navigation {
    /// The member's declaration in the decompiled text.
    Declaration(NavigationTarget),
    /// The member has no declaration to navigate to.
    Unavailable,
}

impl Navigation {
    pub fn target(&self) -> Option<&NavigationTarget> {
        match self {
            Self::Declaration(target) => Some(target),
            Self::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// A declaration inside a decompiled unit.
#[derive(Clone, Debug)]
pub struct NavigationTarget {
    data: Arc<DecompiledData>,
    id: DeclId,
    /// The declared name.
    pub name: SmolStr,
    /// The member kind.
    pub kind: MemberKind,
    /// Range of the whole declaration.
    pub range: TextRange,
    /// Range of the declared name.
    pub name_range: TextRange,
    /// Line/column span of the declared name (0-indexed).
    pub span: Span,
}

impl NavigationTarget {
    fn new(data: Arc<DecompiledData>, id: DeclId) -> Option<Self> {
        let info = data.unit().declaration(id)?;
        let span = Span::from_range(data.unit().contents(), info.name_range());
        Some(Self {
            name: info.name.clone(),
            kind: info.kind,
            range: info.range(),
            name_range: info.name_range(),
            span,
            id,
            data,
        })
    }

    pub fn decl_id(&self) -> DeclId {
        self.id
    }

    /// The decompiled file the target lives in.
    pub fn file(&self) -> &DecompiledUnit {
        self.data.unit()
    }

    pub fn data(&self) -> &Arc<DecompiledData> {
        &self.data
    }

    /// The declaration node, materialized in a fresh tree on this thread.
    pub fn syntax(&self) -> Option<Declaration> {
        let unit = self.data.unit();
        unit.declaration_node(&unit.syntax(), self.id)
    }
}

/// Resolve a compiled member to its decompiled declaration.
///
/// Failures to build decompiled data are logged and reported as
/// [`Navigation::Unavailable`]; use [`try_resolve`] to see them.
pub fn resolve(element: &CompiledElement) -> Navigation {
    match try_resolve(element) {
        Ok(navigation) => navigation,
        Err(error) => {
            tracing::warn!(
                class = element.unit().binary_name(),
                member = %element.member().name,
                %error,
                "decompiled data unavailable"
            );
            Navigation::Unavailable
        }
    }
}

/// Resolve a compiled member, surfacing build failures.
pub fn try_resolve(element: &CompiledElement) -> Result<Navigation, DecompilationError> {
    let unit = element.unit();
    let data = get_decompiled_data(unit)?;
    let member = element.member();

    let Some(id) = data.index().lookup(unit, member).and_then(|m| m.declaration()) else {
        tracing::trace!(member = %member.name, "no declaration for member");
        return Ok(Navigation::Unavailable);
    };
    Ok(NavigationTarget::new(data, id).map_or(Navigation::Unavailable, Navigation::Declaration))
}
