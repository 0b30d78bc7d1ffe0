//! Compiled units and handles to their members.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{CompiledMember, MemberKey, MemberKind};
use crate::classfile::{ClassFile, ClassFileError};
use crate::decompiler::{BuildOnce, DecompiledData};

/// The raw bytes of one compiled class plus its declared members.
///
/// Decompiled data is cached inside the unit, so it lives exactly as long as
/// the unit does. Share a unit across threads through an `Arc`.
#[derive(Debug)]
pub struct CompiledUnit {
    binary_name: SmolStr,
    bytes: Arc<[u8]>,
    members: Vec<CompiledMember>,
    decompiled: BuildOnce<Arc<DecompiledData>>,
}

impl CompiledUnit {
    /// A unit with an explicit member list. Occurrence ordinals are assigned
    /// here, in list order.
    pub fn new(binary_name: impl Into<SmolStr>, bytes: impl Into<Arc<[u8]>>, members: Vec<CompiledMember>) -> Self {
        let mut members = members;
        assign_occurrences(&mut members);
        Self {
            binary_name: binary_name.into(),
            bytes: bytes.into(),
            members,
            decompiled: BuildOnce::new(),
        }
    }

    /// Read the member list from the class file itself: the type first, then
    /// fields, then methods, each in binary order.
    pub fn from_class_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, ClassFileError> {
        let bytes = bytes.into();
        let class = ClassFile::parse(&bytes)?;

        let mut members = Vec::with_capacity(1 + class.fields.len() + class.methods.len());
        members.push(CompiledMember::type_member(class.simple_name(), class.access));
        members.extend(
            class
                .fields
                .iter()
                .map(|f| CompiledMember::field(f.name.clone(), f.descriptor.clone(), f.access)),
        );
        members.extend(
            class
                .methods
                .iter()
                .map(|m| CompiledMember::method(m.name.clone(), m.descriptor.clone(), m.access)),
        );

        Ok(Self::new(class.this_class.clone(), bytes, members))
    }

    /// Binary name with slashes, e.g. `a/b/Foo`.
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn members(&self) -> &[CompiledMember] {
        &self.members
    }

    pub fn member_key(&self, member: &CompiledMember) -> MemberKey {
        MemberKey::new(self.binary_name.clone(), member)
    }

    /// Handles to every member of a shared unit.
    pub fn elements(self: &Arc<Self>) -> impl Iterator<Item = CompiledElement> + '_ {
        (0..self.members.len()).map(move |index| CompiledElement {
            unit: Arc::clone(self),
            index,
        })
    }

    pub fn element(self: &Arc<Self>, index: usize) -> Option<CompiledElement> {
        (index < self.members.len()).then(|| CompiledElement {
            unit: Arc::clone(self),
            index,
        })
    }

    /// Find a member handle by kind and name; the first match wins.
    pub fn find_element(self: &Arc<Self>, kind: MemberKind, name: &str) -> Option<CompiledElement> {
        let index = self
            .members
            .iter()
            .position(|m| m.kind == kind && m.name == name)?;
        self.element(index)
    }

    /// How many times decompiled data has been built for this unit.
    pub fn build_count(&self) -> usize {
        self.decompiled.build_count()
    }

    pub(crate) fn decompiled_cell(&self) -> &BuildOnce<Arc<DecompiledData>> {
        &self.decompiled
    }
}

fn assign_occurrences(members: &mut [CompiledMember]) {
    let mut seen: FxHashMap<(MemberKind, SmolStr, SmolStr), usize> = FxHashMap::default();
    for member in members {
        let count = seen
            .entry((member.kind, member.name.clone(), member.erased_signature()))
            .or_default();
        member.occurrence = *count;
        *count += 1;
    }
}

/// A handle to one member of a shared [`CompiledUnit`].
#[derive(Debug, Clone)]
pub struct CompiledElement {
    unit: Arc<CompiledUnit>,
    index: usize,
}

impl CompiledElement {
    pub fn unit(&self) -> &Arc<CompiledUnit> {
        &self.unit
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn member(&self) -> &CompiledMember {
        &self.unit.members[self.index]
    }

    pub fn key(&self) -> MemberKey {
        self.unit.member_key(self.member())
    }
}

impl PartialEq for CompiledElement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.unit, &other.unit) && self.index == other.index
    }
}

impl Eq for CompiledElement {}
