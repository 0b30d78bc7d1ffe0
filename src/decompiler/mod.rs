//! Decompiled views of compiled classes.
//!
//! A [`CompiledUnit`] is rendered into declaration-only pseudo-source
//! ([`synthesize`]), parsed into a [`DecompiledUnit`], and its members are
//! paired with the synthesized declarations in a [`MappingIndex`]. The pair
//! is built at most once per unit and cached inside it
//! ([`get_decompiled_data`]).
//!
//! ## Usage
//!
//! ```ignore
//! use clsview::compiled::CompiledUnit;
//! use clsview::decompiler::get_decompiled_data;
//!
//! let unit = CompiledUnit::from_class_bytes(bytes)?;
//! let data = get_decompiled_data(&unit)?;
//! println!("{}", data.unit().contents());
//! ```

mod cache;
mod error;
mod mapping;
mod options;
mod synthesize;
mod types;
mod unit;

use std::sync::Arc;

pub use cache::BuildOnce;
pub use error::DecompilationError;
pub use mapping::{Mapping, MappingIndex};
pub use options::DecompilerOptions;
pub use synthesize::{is_renderable_name, quote_name, synthesize, synthesize_with};
pub use unit::{DeclId, DeclarationInfo, DecompiledUnit};

use crate::compiled::{CompiledMember, CompiledUnit};

/// A synthesized unit together with the mapping of its compiled members.
#[derive(Debug, Clone)]
pub struct DecompiledData {
    unit: DecompiledUnit,
    index: MappingIndex,
}

impl DecompiledData {
    pub fn unit(&self) -> &DecompiledUnit {
        &self.unit
    }

    pub fn index(&self) -> &MappingIndex {
        &self.index
    }

    /// The declaration a member of `compiled` maps to, if any.
    pub fn declaration_for(&self, compiled: &CompiledUnit, member: &CompiledMember) -> Option<&DeclarationInfo> {
        let id = self.index.lookup(compiled, member)?.declaration()?;
        self.unit.declaration(id)
    }
}

/// Decompiled data for `unit` with default options, built on first access.
pub fn get_decompiled_data(unit: &CompiledUnit) -> Result<Arc<DecompiledData>, DecompilationError> {
    get_decompiled_data_with(unit, &DecompilerOptions::default())
}

/// Decompiled data for `unit`, built on first access.
///
/// `options` only matter for the call that performs the build; once data is
/// cached every caller gets the same value.
pub fn get_decompiled_data_with(
    unit: &CompiledUnit,
    options: &DecompilerOptions,
) -> Result<Arc<DecompiledData>, DecompilationError> {
    unit.decompiled_cell().get_or_try_build(|| {
        tracing::debug!(class = unit.binary_name(), "building decompiled data");
        let decompiled = synthesize_with(unit, options)?;
        let index = MappingIndex::build(unit, &decompiled);
        Ok(Arc::new(DecompiledData {
            unit: decompiled,
            index,
        }))
    })
}
