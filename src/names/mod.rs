//! Fully-qualified names of namespace headers.
//!
//! - [`HeaderNode`] owns a parsed `package` header and memoizes its [`FqName`]
//!   with an explicit invalidation hook.
//! - [`NamespaceResolver`] resolves header segments through an injected
//!   [`ReferenceProvider`].
//!
//! [`FqName`]: crate::base::FqName

mod header;
mod reference;

pub use header::{HeaderEditError, HeaderNode};
pub use reference::{NamespaceResolver, ReferenceProvider, SegmentReference};
