//! Gauss's law over a circular surface: Φ = Q_enc / ε₀.

use crate::charges::Charge;
use crate::constants::{microcoulombs_to_coulombs, VACUUM_PERMITTIVITY};
use crate::math::{Scalar, V2};

/// Circular region used for enclosed-charge analysis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSurface {
    /// Centre of the circle.
    pub center: V2,
    /// Radius in canvas units.
    pub radius: Scalar,
}

impl GaussianSurface {
    /// Creates a surface.
    #[must_use]
    pub const fn new(center: V2, radius: Scalar) -> Self {
        Self { center, radius }
    }

    /// True when `point` lies strictly inside the circle.
    #[must_use]
    pub fn contains(&self, point: &V2) -> bool {
        (point - self.center).norm() < self.radius
    }
}

/// Enclosed charge and the flux it produces.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussReport {
    /// Enclosed charge in µC.
    pub enclosed: Scalar,
    /// Electric flux in N·m²/C.
    pub flux: Scalar,
}

/// Sum of magnitudes (µC) of the charges strictly inside `surface`.
#[must_use]
pub fn enclosed_charge(charges: &[Charge], surface: &GaussianSurface) -> Scalar {
    charges
        .iter()
        .filter(|c| surface.contains(&c.position))
        .map(|c| c.magnitude)
        .sum()
}

/// Flux through any closed surface enclosing `enclosed_uc` microcoulombs.
#[must_use]
pub fn flux(enclosed_uc: Scalar) -> Scalar {
    microcoulombs_to_coulombs(enclosed_uc) / VACUUM_PERMITTIVITY
}

/// Enclosed charge and flux for `surface` in one pass.
#[must_use]
pub fn analyze(charges: &[Charge], surface: &GaussianSurface) -> GaussReport {
    let enclosed = enclosed_charge(charges, surface);
    GaussReport { enclosed, flux: flux(enclosed) }
}
