use crate::charges::Charge;
use crate::constants::COULOMB_CONSTANT;
use crate::math::{Bounds, Scalar, V2};

use super::electric::{FieldSample, NormalizedField};

/// Squared distance below which a charge's contribution is dropped.
pub const DEFAULT_SINGULARITY_R2: Scalar = 1.0;

/// Superposition field evaluator over a charge snapshot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEvaluator {
    /// Contributions from charges closer than `sqrt(singularity_r2)` are skipped, not clamped.
    pub singularity_r2: Scalar,
}

impl Default for FieldEvaluator {
    fn default() -> Self {
        Self { singularity_r2: DEFAULT_SINGULARITY_R2 }
    }
}

impl FieldEvaluator {
    /// Evaluator with a custom singularity threshold (squared distance units).
    #[must_use]
    pub const fn new(singularity_r2: Scalar) -> Self {
        Self { singularity_r2 }
    }

    /// Electric field E at `point` due to `charges` (µC), in N/C.
    ///
    /// Works for any coordinates; bounds checks are the caller's concern.
    #[must_use]
    pub fn field_at(&self, charges: &[Charge], point: V2) -> V2 {
        let mut e = V2::zeros();
        for c in charges {
            let d = point - c.position;
            let r2 = d.norm_squared();
            if r2 < self.singularity_r2 {
                continue;
            }
            let r = r2.sqrt();
            e += d * (COULOMB_CONSTANT * c.coulombs() / (r2 * r));
        }
        e
    }

    /// Field vector and magnitude at `point`.
    #[must_use]
    pub fn sample(&self, charges: &[Charge], point: V2) -> FieldSample {
        FieldSample::new(self.field_at(charges, point))
    }

    /// Unit field direction at `point`, undefined where the net field vanishes.
    #[must_use]
    pub fn normalized_field_at(&self, charges: &[Charge], point: V2) -> NormalizedField {
        self.sample(charges, point).normalized()
    }

    /// Samples the field on a cell-centred grid for arrow rendering.
    ///
    /// Arrow length and opacity grow with `log10 |E|`; weak points are omitted.
    #[must_use]
    pub fn sample_grid(&self, charges: &[Charge], bounds: &Bounds, grid: &GridConfig) -> Vec<GridArrow> {
        if charges.is_empty() {
            return Vec::new();
        }
        bounds
            .lattice(grid.spacing)
            .into_iter()
            .filter_map(|origin| {
                let field = self.normalized_field_at(charges, origin);
                if field.magnitude < grid.min_magnitude || !field.is_defined() {
                    return None;
                }
                let decades = field.magnitude.log10();
                let length = (decades * grid.length_per_decade).min(grid.spacing / 2.0);
                let opacity = (decades / grid.opacity_decades).min(grid.max_opacity);
                Some(GridArrow {
                    origin,
                    tip: origin + field.direction * length,
                    direction: field.direction,
                    magnitude: field.magnitude,
                    opacity,
                })
            })
            .collect()
    }
}

/// Layout of the background vector grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Grid pitch in canvas units.
    pub spacing: Scalar,
    /// Points with |E| below this (N/C) get no arrow.
    pub min_magnitude: Scalar,
    /// Arrow length per decade of |E|, capped at half the pitch.
    pub length_per_decade: Scalar,
    /// Decades of |E| that map to full opacity before capping.
    pub opacity_decades: Scalar,
    /// Upper bound on arrow opacity.
    pub max_opacity: Scalar,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 40.0,
            min_magnitude: 1.0,
            length_per_decade: 5.0,
            opacity_decades: 8.0,
            max_opacity: 0.8,
        }
    }
}

/// One arrow of the background vector grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridArrow {
    /// Grid point the arrow starts from.
    pub origin: V2,
    /// Arrow tip.
    pub tip: V2,
    /// Unit field direction.
    pub direction: V2,
    /// |E| in N/C.
    pub magnitude: Scalar,
    /// Opacity in `[0, max_opacity]`.
    pub opacity: Scalar,
}
