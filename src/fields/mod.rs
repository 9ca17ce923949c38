//! Electrostatic field, force, and flux evaluation over a charge snapshot.

mod electric;
mod electrostatic;
mod force;
/// Enclosed charge and flux through a circular Gaussian surface.
pub mod gauss;

pub use electric::{FieldSample, NormalizedField};
pub use electrostatic::{FieldEvaluator, GridArrow, GridConfig, DEFAULT_SINGULARITY_R2};
pub use force::{force_between, force_between_ids, MIN_SEPARATION_R2};
pub use gauss::{analyze as analyze_gauss, enclosed_charge, flux, GaussReport, GaussianSurface};
