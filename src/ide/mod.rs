//! IDE features: navigation from compiled members into decompiled text.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use clsview::compiled::{CompiledUnit, MemberKind};
//! use clsview::ide::{Navigation, resolve};
//!
//! let unit = Arc::new(CompiledUnit::from_class_bytes(bytes)?);
//! let element = unit.find_element(MemberKind::Method, "bar").unwrap();
//! if let Navigation::Declaration(target) = resolve(&element) {
//!     println!("{}:{}", target.file().file_name(), target.span.start.line);
//! }
//! ```

mod navigation;

pub use navigation::{Navigation, NavigationTarget, resolve, try_resolve};
