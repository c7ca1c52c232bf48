//! Rhachet Path Grammar
//!
//! Pure functions over pipeline output paths of the shape
//! `<dir>/<prefix>.[<doctype>].v<N>.i<M>.<ext>`.
//!
//! # Core Concepts
//!
//! - [`decode`]: split a path into [`DecodedPath`]
//! - [`TranslateDirective`]: parsed `@translate(references.0).as(..)` directive
//! - [`translate`]: compute the next step's path from an upstream path
//! - [`relate`]: re-root a path relative to its directory or `@gitroot/`
//!
//! # Example
//!
//! ```rust
//! use rha_path::{decode, translate};
//!
//! let decoded = decode("a/b.[stories].v1.i3.md").unwrap();
//! assert_eq!(decoded.doctype, "stories");
//!
//! let next = translate(
//!     "@translate(references.0).as(story)",
//!     "src/persp.v2i3.[stories].v5.i7.md",
//! )
//! .unwrap();
//! assert_eq!(next, "src/persp.v2i3.v5i7.[story].v1.md");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod decode;
mod directive;
mod error;
mod relate;
mod translate;

pub use decode::{decode, DecodedPath, VersionTrail};
pub use directive::{is_translate_directive, ReferenceSource, TranslateDirective, TRANSLATE_KEYWORD};
pub use error::PathError;
pub use relate::{join_normalized, relate, split_basename, GITROOT_ALIAS};
pub use translate::translate;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
