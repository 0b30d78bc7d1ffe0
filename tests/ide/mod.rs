//! IDE feature tests
//!
//! Tests for:
//! - Navigation from compiled members to decompiled declarations

pub mod tests_navigation;
