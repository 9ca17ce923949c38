//! Physical constants and unit conversions used by the sandbox.
//!
//! ## Accuracy
//!
//! The Coulomb constant and vacuum permittivity are given with 11 significant
//! figures (CODATA 2018). The sandbox works in canvas units for distance and
//! microcoulombs for charge, so results are "SI-shaped" rather than physical:
//! a distance of 100 units is treated as 100 m.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>

use crate::math::Scalar;

/// Coulomb constant _k_ = 1 / (4πε₀) in N·m²/C².
pub const COULOMB_CONSTANT: Scalar = 8.987_551_792_3e9;
/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m.
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;
/// Coulombs per microcoulomb.
pub const MICROCOULOMB: Scalar = 1.0e-6;

/// Converts a charge in microcoulombs to coulombs.
#[inline]
#[must_use]
pub fn microcoulombs_to_coulombs(q_uc: Scalar) -> Scalar {
    q_uc * MICROCOULOMB
}
