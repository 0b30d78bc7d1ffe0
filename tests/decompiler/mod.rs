//! Decompiler tests
//!
//! Tests for:
//! - Synthesized text and its determinism
//! - Mapping index soundness and tie-breaking
//! - Build-once caching under concurrency and failure

pub mod tests_cache;
pub mod tests_mapping;
pub mod tests_synthesize;
