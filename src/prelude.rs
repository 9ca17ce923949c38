//! Convenience re-exports for building a sandbox front end.

pub use crate::charges::{Charge, ChargeId, ChargeListing, ChargeStore, Polarity, DEFAULT_HIT_RADIUS};
pub use crate::config::SandboxConfig;
pub use crate::constants::*;
pub use crate::errors::SandboxError;
pub use crate::fields::{
    analyze_gauss, enclosed_charge, flux, force_between, force_between_ids, FieldEvaluator, FieldSample,
    GaussReport, GaussianSurface, GridArrow, GridConfig, NormalizedField,
};
pub use crate::math::{Bounds, Scalar, V2};
pub use crate::sandbox::{
    parse_magnitude, Command, CoulombReport, Frame, InfoPanel, Outcome, RenderedStreamline, Sandbox,
};
pub use crate::selection::PairSelection;
pub use crate::streamline::{Arrowhead, Streamline, StreamlineSegment, StreamlineTracer, TracerConfig};
