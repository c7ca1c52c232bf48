//! Rhachet Output Resolution
//!
//! Pre-processing hook run on a pipeline step's configuration before its
//! artifact is written: a declared `@translate(...)` output is replaced by the
//! concrete path derived from the step's first reference.
//!
//! # Example
//!
//! ```rust
//! use rha_output::{resolve_output_path, StepOutputConfig};
//!
//! let step: StepOutputConfig = serde_json::from_str(
//!     r#"{"output": "@translate(references.0).as(story)", "references": "in/a.[stories].v2.md"}"#,
//! )
//! .unwrap();
//! let resolved = resolve_output_path(step).unwrap();
//! assert_eq!(resolved.output().and_then(|v| v.as_str()), Some("in/a.v2.[story].v1.md"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{resolve_output_path, OutputPathResolver, StepOutputConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
