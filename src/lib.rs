#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and unit conversions.
pub mod constants;
/// Shared numerical primitives (vectors, domain bounds).
pub mod math;
/// Point charges and the ordered charge store.
pub mod charges;
/// Field, force, and flux evaluation.
pub mod fields;
/// Field-line tracing.
pub mod streamline;
/// Force-panel charge selection.
pub mod selection;
/// Session configuration.
pub mod config;
/// Command dispatch and frame assembly.
pub mod sandbox;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
