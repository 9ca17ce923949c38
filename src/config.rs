//! Numeric configuration of a sandbox session.

use crate::charges::DEFAULT_HIT_RADIUS;
use crate::errors::SandboxError;
use crate::fields::{FieldEvaluator, GridConfig};
use crate::math::{Bounds, Scalar, MAX_LATTICE_POINTS};
use crate::streamline::{StreamlineTracer, TracerConfig};

/// Everything a [`Sandbox`](crate::sandbox::Sandbox) needs besides its charges.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandboxConfig {
    /// Simulation domain (the canvas).
    pub domain: Bounds,
    /// Hit radius given to newly placed charges.
    pub hit_radius: Scalar,
    /// Field evaluation settings.
    pub field: FieldEvaluator,
    /// Background vector grid layout.
    pub grid: GridConfig,
    /// Field-line tracer parameters.
    pub tracer: TracerConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::canvas(800.0, 600.0)
    }
}

impl SandboxConfig {
    /// Default settings over a `width × height` canvas.
    #[must_use]
    pub fn canvas(width: Scalar, height: Scalar) -> Self {
        Self {
            domain: Bounds::from_size(width, height),
            hit_radius: DEFAULT_HIT_RADIUS,
            field: FieldEvaluator::default(),
            grid: GridConfig::default(),
            tracer: TracerConfig::default(),
        }
    }

    /// Tracer bound to this configuration's domain and field settings.
    #[must_use]
    pub fn tracer(&self) -> StreamlineTracer {
        StreamlineTracer::new(self.domain, self.tracer).with_field(self.field)
    }

    /// Rejects empty or unbounded domains, non-positive sizes, and sampling
    /// pitches that would produce more than [`MAX_LATTICE_POINTS`] points.
    pub fn validate(&self) -> Result<(), SandboxError> {
        if !self.domain.is_finite() {
            return Err(SandboxError::InvalidConfig("domain corners must be finite".into()));
        }
        let (w, h) = (self.domain.width(), self.domain.height());
        if w <= 0.0 || h <= 0.0 {
            return Err(SandboxError::InvalidConfig(format!("domain must have positive area, got {w} x {h}")));
        }
        if self.hit_radius.is_nan() || self.hit_radius <= 0.0 {
            return Err(SandboxError::InvalidConfig(format!("hit radius must be positive, got {}", self.hit_radius)));
        }
        if self.field.singularity_r2.is_nan() || self.field.singularity_r2 < 0.0 {
            return Err(SandboxError::InvalidConfig("singularity threshold must be non-negative".into()));
        }
        let grid = [
            ("spacing", self.grid.spacing),
            ("length_per_decade", self.grid.length_per_decade),
            ("opacity_decades", self.grid.opacity_decades),
        ];
        for (name, value) in grid {
            if !value.is_finite() || value <= 0.0 {
                return Err(SandboxError::InvalidConfig(format!("grid {name} must be positive, got {value}")));
            }
        }
        if self.grid.min_magnitude.is_nan() || self.grid.max_opacity.is_nan() || self.grid.max_opacity < 0.0 {
            return Err(SandboxError::InvalidConfig("grid thresholds must be non-negative numbers".into()));
        }
        self.tracer.validate()?;
        for (name, spacing) in [("grid", self.grid.spacing), ("seed", self.tracer.seed_spacing)] {
            if self.domain.lattice_dims(spacing).is_none() {
                return Err(SandboxError::InvalidConfig(format!(
                    "{name} spacing {spacing} gives more than {MAX_LATTICE_POINTS} lattice points over {w} x {h}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::V2;

    #[test]
    fn default_is_valid() {
        assert!(SandboxConfig::default().validate().is_ok());
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        let mut config = SandboxConfig::default();
        config.domain = Bounds::new(V2::new(0.0, 0.0), V2::new(100.0, 0.0));
        assert!(matches!(config.validate(), Err(SandboxError::InvalidConfig(_))));
    }

    #[test]
    fn infinite_domain_is_rejected() {
        let mut config = SandboxConfig::default();
        config.domain = Bounds::new(V2::new(0.0, 0.0), V2::new(Scalar::INFINITY, 600.0));
        assert!(matches!(config.validate(), Err(SandboxError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_lattices_are_rejected() {
        let mut config = SandboxConfig::default();
        config.grid.spacing = 1.0e-3;
        assert!(matches!(config.validate(), Err(SandboxError::InvalidConfig(_))));

        let mut config = SandboxConfig::default();
        config.tracer.seed_spacing = 1.0e-3;
        assert!(matches!(config.validate(), Err(SandboxError::InvalidConfig(_))));
    }

    #[test]
    fn grid_scaling_must_be_positive() {
        let mut config = SandboxConfig::default();
        config.grid.opacity_decades = 0.0;
        assert!(matches!(config.validate(), Err(SandboxError::InvalidConfig(_))));

        let mut config = SandboxConfig::default();
        config.grid.length_per_decade = -5.0;
        assert!(matches!(config.validate(), Err(SandboxError::InvalidConfig(_))));
    }

    #[test]
    fn tracer_inherits_field_settings() {
        let mut config = SandboxConfig::canvas(400.0, 300.0);
        config.field = FieldEvaluator::new(4.0);
        let tracer = config.tracer();
        assert_eq!(tracer.field.singularity_r2, 4.0);
        assert_eq!(tracer.domain, Bounds::from_size(400.0, 300.0));
    }
}
