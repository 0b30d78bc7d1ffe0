//! Shared fixtures for the integration suite.

#![allow(dead_code)]

pub mod class_fixtures;
pub mod source_fixtures;
