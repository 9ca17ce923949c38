use crate::math::{unit_and_norm, Scalar, V2};

/// Raw field vector at a point together with its Euclidean length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Field vector in N/C.
    pub vector: V2,
    /// `|vector|` in N/C.
    pub magnitude: Scalar,
}

impl FieldSample {
    /// Wraps a raw field vector.
    #[must_use]
    pub fn new(vector: V2) -> Self {
        Self { vector, magnitude: vector.norm() }
    }

    /// Unit direction and magnitude; zero/zero when the vector vanishes.
    #[must_use]
    pub fn normalized(&self) -> NormalizedField {
        match unit_and_norm(&self.vector) {
            Some((direction, magnitude)) => NormalizedField { direction, magnitude },
            None => NormalizedField::undefined(),
        }
    }
}

/// Unit field direction with the magnitude it was normalized from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedField {
    /// Unit direction, or the zero vector when undefined.
    pub direction: V2,
    /// Magnitude in N/C, zero when undefined.
    pub magnitude: Scalar,
}

impl NormalizedField {
    /// Direction-less result used where the field vanishes.
    #[must_use]
    pub fn undefined() -> Self {
        Self { direction: V2::zeros(), magnitude: 0.0 }
    }

    /// True when a direction exists.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.magnitude > 0.0
    }
}
