//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (positions, field and force directions).
pub type V2 = Vector2<Scalar>;

/// Upper bound on the number of points in a sampling lattice.
pub const MAX_LATTICE_POINTS: usize = 1 << 20;

/// Axis-aligned rectangular simulation domain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower-left corner (inclusive).
    pub min: V2,
    /// Upper-right corner (inclusive).
    pub max: V2,
}

impl Bounds {
    /// Creates bounds from two corners, ordering them component-wise.
    #[must_use]
    pub fn new(a: V2, b: V2) -> Self {
        Self {
            min: V2::new(a.x.min(b.x), a.y.min(b.y)),
            max: V2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Canvas-style bounds spanning `[0, width] × [0, height]`.
    #[must_use]
    pub fn from_size(width: Scalar, height: Scalar) -> Self {
        Self::new(V2::zeros(), V2::new(width, height))
    }

    /// Width of the domain.
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.max.x - self.min.x
    }

    /// Height of the domain.
    #[must_use]
    pub fn height(&self) -> Scalar {
        self.max.y - self.min.y
    }

    /// True when `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &V2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// True when both corners are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
    }

    /// Columns and rows of the lattice with pitch `spacing`, or `None` when the
    /// bounds or pitch are not finite and positive, or the lattice would exceed
    /// [`MAX_LATTICE_POINTS`].
    #[must_use]
    pub fn lattice_dims(&self, spacing: Scalar) -> Option<(usize, usize)> {
        if !self.is_finite() || !spacing.is_finite() || spacing <= 0.0 {
            return None;
        }
        let count = |extent: Scalar| ((extent - spacing / 2.0) / spacing).ceil().max(0.0);
        let (nx, ny) = (count(self.width()), count(self.height()));
        if nx * ny > MAX_LATTICE_POINTS as Scalar {
            return None;
        }
        Some((nx as usize, ny as usize))
    }

    /// Cell-centred lattice with pitch `spacing`, starting half a pitch inside the
    /// lower-left corner and proceeding column by column.
    ///
    /// Empty when [`Self::lattice_dims`] rejects the pitch.
    #[must_use]
    pub fn lattice(&self, spacing: Scalar) -> Vec<V2> {
        let Some((nx, ny)) = self.lattice_dims(spacing) else {
            return Vec::new();
        };
        let origin = self.min + V2::repeat(spacing / 2.0);
        let mut out = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            for j in 0..ny {
                out.push(origin + V2::new(i as Scalar, j as Scalar) * spacing);
            }
        }
        out
    }
}

/// Returns `v / |v|` and `|v|`, or `None` when `v` has zero length.
#[must_use]
pub fn unit_and_norm(v: &V2) -> Option<(V2, Scalar)> {
    let norm = v.norm();
    if norm > 0.0 && norm.is_finite() {
        Some((v / norm, norm))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn bounds_orders_corners() {
        let b = Bounds::new(V2::new(10.0, -5.0), V2::new(0.0, 5.0));
        assert_eq!(b.min, V2::new(0.0, -5.0));
        assert_eq!(b.max, V2::new(10.0, 5.0));
        assert!(b.contains(&V2::new(10.0, 0.0)));
        assert!(!b.contains(&V2::new(10.1, 0.0)));
    }

    #[test]
    fn lattice_is_cell_centred() {
        let pts = Bounds::from_size(100.0, 40.0).lattice(40.0);
        assert_eq!(pts, vec![V2::new(20.0, 20.0), V2::new(60.0, 20.0)]);
        assert!(Bounds::from_size(100.0, 100.0).lattice(0.0).is_empty());
    }

    #[test]
    fn lattice_refuses_unbounded_sizes() {
        let infinite = Bounds::new(V2::zeros(), V2::new(Scalar::INFINITY, 100.0));
        assert!(!infinite.is_finite());
        assert!(infinite.lattice_dims(10.0).is_none());
        assert!(infinite.lattice(10.0).is_empty());

        let canvas = Bounds::from_size(800.0, 600.0);
        assert_eq!(canvas.lattice_dims(50.0), Some((16, 12)));
        assert!(canvas.lattice_dims(1.0e-3).is_none());
        assert!(canvas.lattice(1.0e-3).is_empty());
    }

    #[test]
    fn unit_and_norm_rejects_zero() {
        assert!(unit_and_norm(&V2::zeros()).is_none());
        let (u, n) = unit_and_norm(&V2::new(3.0, 4.0)).unwrap();
        assert_relative_eq!(n, 5.0);
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1.0e-12);
    }
}
