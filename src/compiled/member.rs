//! Members of a compiled class.

use smol_str::SmolStr;

use crate::classfile::AccessFlags;

/// What a compiled member is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    /// The class itself.
    Type,
    Method,
    Field,
}

/// One declared member of a compiled class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledMember {
    pub kind: MemberKind,
    pub name: SmolStr,
    /// Full JVM descriptor; empty for [`MemberKind::Type`].
    pub descriptor: SmolStr,
    pub access: AccessFlags,
    /// How many earlier members of the same unit share this member's key.
    /// Assigned by [`CompiledUnit`](super::CompiledUnit).
    pub(crate) occurrence: usize,
}

impl CompiledMember {
    pub fn new(
        kind: MemberKind,
        name: impl Into<SmolStr>,
        descriptor: impl Into<SmolStr>,
        access: AccessFlags,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            descriptor: descriptor.into(),
            access,
            occurrence: 0,
        }
    }

    pub fn type_member(name: impl Into<SmolStr>, access: AccessFlags) -> Self {
        Self::new(MemberKind::Type, name, "", access)
    }

    pub fn method(name: impl Into<SmolStr>, descriptor: impl Into<SmolStr>, access: AccessFlags) -> Self {
        Self::new(MemberKind::Method, name, descriptor, access)
    }

    pub fn field(name: impl Into<SmolStr>, descriptor: impl Into<SmolStr>, access: AccessFlags) -> Self {
        Self::new(MemberKind::Field, name, descriptor, access)
    }

    /// Signature used for matching: empty for types, the descriptor for
    /// fields and the parameter part (`(I)`) for methods.
    pub fn erased_signature(&self) -> SmolStr {
        match self.kind {
            MemberKind::Type => SmolStr::default(),
            MemberKind::Field => self.descriptor.clone(),
            MemberKind::Method => match self.descriptor.find(')') {
                Some(end) => SmolStr::new(&self.descriptor[..=end]),
                None => self.descriptor.clone(),
            },
        }
    }

    /// Synthetic and bridge members and class initializers have no
    /// counterpart in source.
    pub fn is_compiler_generated(&self) -> bool {
        if self.access.is_synthetic() {
            return true;
        }
        match self.kind {
            MemberKind::Method => self.access.contains(AccessFlags::BRIDGE) || self.name == "<clinit>",
            MemberKind::Type | MemberKind::Field => false,
        }
    }

    pub fn occurrence(&self) -> usize {
        self.occurrence
    }
}

/// Identity of a compiled member: owner, kind, name and erased signature.
///
/// Two members of one class can share a key (a covariant override and its
/// erased twin); [`CompiledMember::occurrence`] tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    pub owner: SmolStr,
    pub kind: MemberKind,
    pub name: SmolStr,
    pub signature: SmolStr,
}

impl MemberKey {
    pub fn new(owner: impl Into<SmolStr>, member: &CompiledMember) -> Self {
        Self {
            owner: owner.into(),
            kind: member.kind,
            name: member.name.clone(),
            signature: member.erased_signature(),
        }
    }
}
