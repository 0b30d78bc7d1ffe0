//! Index from compiled members to synthesized declarations.

use std::collections::VecDeque;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::synthesize::renders_member;
use super::{DeclId, DecompiledUnit};
use crate::compiled::{CompiledMember, CompiledUnit, MemberKey, MemberKind};

/// Where a compiled member lands in the synthesized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mapping {
    Declaration(DeclId),
    /// The member has no synthesized counterpart (compiler-generated, or
    /// not rendered).
    NoDeclaration,
}

impl Mapping {
    pub fn declaration(self) -> Option<DeclId> {
        match self {
            Self::Declaration(id) => Some(id),
            Self::NoDeclaration => None,
        }
    }
}

/// Outcome for every member of one compiled unit, in member order.
///
/// Members sharing a key keep one outcome each, indexed by
/// [`CompiledMember::occurrence`].
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
    entries: IndexMap<MemberKey, Vec<Mapping>>,
}

type LookupKey = (MemberKind, SmolStr, SmolStr);

impl MappingIndex {
    /// Pair each member with a declaration of the same kind, name and erased
    /// signature. Among equal keys the n-th unmatched member takes the n-th
    /// unmatched declaration. Members that are never rendered take nothing.
    pub fn build(unit: &CompiledUnit, decompiled: &DecompiledUnit) -> Self {
        let mut table: FxHashMap<LookupKey, VecDeque<DeclId>> = FxHashMap::default();
        for id in decompiled.decl_ids() {
            if let Some(info) = decompiled.declaration(id) {
                table
                    .entry((info.kind, info.name.clone(), info.signature.clone()))
                    .or_default()
                    .push_back(id);
            }
        }

        let mut entries: IndexMap<MemberKey, Vec<Mapping>> = IndexMap::with_capacity(unit.members().len());
        let mut matched = 0usize;
        for member in unit.members() {
            let outcome = if member.is_compiler_generated()
                || !matches!(renders_member(member.kind, &member.name, &member.descriptor), Ok(true))
            {
                Mapping::NoDeclaration
            } else {
                let lookup = (member.kind, member.name.clone(), member.erased_signature());
                match table.get_mut(&lookup) {
                    Some(candidates) => {
                        if candidates.len() > 1 {
                            tracing::trace!(
                                name = %member.name,
                                signature = %member.erased_signature(),
                                candidates = candidates.len(),
                                "tie resolved by declaration order"
                            );
                        }
                        candidates.pop_front().map_or(Mapping::NoDeclaration, Mapping::Declaration)
                    }
                    None => Mapping::NoDeclaration,
                }
            };
            if outcome != Mapping::NoDeclaration {
                matched += 1;
            }
            entries.entry(unit.member_key(member)).or_default().push(outcome);
        }

        let leftover: usize = table.values().map(VecDeque::len).sum();
        tracing::debug!(
            class = unit.binary_name(),
            members = unit.members().len(),
            matched,
            unmatched = unit.members().len() - matched,
            leftover_declarations = leftover,
            "built mapping index"
        );

        Self { entries }
    }

    /// Outcome for the `occurrence`-th member with `key`.
    pub fn get(&self, key: &MemberKey, occurrence: usize) -> Option<Mapping> {
        self.entries.get(key)?.get(occurrence).copied()
    }

    /// Outcome for a member of the unit this index was built from.
    pub fn lookup(&self, unit: &CompiledUnit, member: &CompiledMember) -> Option<Mapping> {
        self.get(&unit.member_key(member), member.occurrence())
    }

    /// All outcomes recorded for `key`, one per member occurrence.
    pub fn outcomes(&self, key: &MemberKey) -> &[Mapping] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &MemberKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberKey, &[Mapping])> + '_ {
        self.entries.iter().map(|(key, outcomes)| (key, outcomes.as_slice()))
    }
}
