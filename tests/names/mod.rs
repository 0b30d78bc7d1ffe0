//! Namespace header tests
//!
//! Tests for:
//! - FqName computation and memoization
//! - Header edits and cache invalidation
//! - Segment reference resolution

pub mod tests_fq_name;
pub mod tests_reference;
