//! Reference resolution for namespace header segments.
//!
//! Lookup itself is not done here: a [`ReferenceProvider`] is injected into a
//! [`NamespaceResolver`] by whoever owns the declaration registry.

use crate::base::FqName;
use crate::parser::NameRef;

use super::HeaderNode;

/// Resolves one name segment to at most one target.
///
/// `qualified` is the name spelled by the header up to and including the
/// segment, e.g. `a.b` for the `b` in `package a.b.c`.
pub trait ReferenceProvider {
    type Target;

    fn resolve_segment(&self, segment: &NameRef, qualified: &FqName) -> Option<Self::Target>;
}

impl<F, T> ReferenceProvider for F
where
    F: Fn(&NameRef, &FqName) -> Option<T>,
{
    type Target = T;

    fn resolve_segment(&self, segment: &NameRef, qualified: &FqName) -> Option<T> {
        self(segment, qualified)
    }
}

/// One header segment with its resolution outcome.
#[derive(Debug, Clone)]
pub struct SegmentReference<T> {
    pub segment: NameRef,
    pub qualified: FqName,
    pub target: Option<T>,
}

/// Resolves the segments of namespace headers through an injected provider.
#[derive(Debug, Clone)]
pub struct NamespaceResolver<P> {
    provider: P,
}

impl<P: ReferenceProvider> NamespaceResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The target of the header's own name; `None` for the root namespace.
    pub fn reference(&self, header: &HeaderNode) -> Option<P::Target> {
        let last = header.last_part()?;
        self.provider
            .resolve_segment(&last, &header.compute_fq_name())
    }

    /// Every segment of the header, qualifiers first.
    pub fn segment_references(&self, header: &HeaderNode) -> Vec<SegmentReference<P::Target>> {
        let mut qualified = FqName::root();
        header
            .syntax()
            .name_refs()
            .map(|segment| {
                qualified = qualified.child(&segment.referenced_name());
                let target = self.provider.resolve_segment(&segment, &qualified);
                SegmentReference {
                    segment,
                    qualified: qualified.clone(),
                    target,
                }
            })
            .collect()
    }
}
