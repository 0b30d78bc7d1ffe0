//! Compiled classes as seen by the decompiler: raw bytes plus a member list.

mod member;
mod unit;

pub use member::{CompiledMember, MemberKey, MemberKind};
pub use unit::{CompiledElement, CompiledUnit};
