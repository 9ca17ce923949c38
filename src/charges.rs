//! Point charges and the ordered store that owns them.

use std::fmt;

use crate::constants::microcoulombs_to_coulombs;
use crate::errors::SandboxError;
use crate::math::{Scalar, V2};

/// Radius used for hit-testing newly placed charges, in canvas units.
pub const DEFAULT_HIT_RADIUS: Scalar = 12.0;

/// Identifier assigned to a charge on placement; never reused by the same store.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChargeId(pub u64);

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sign of a charge, used by renderers to pick a colour.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Magnitude above zero.
    Positive,
    /// Magnitude below zero.
    Negative,
    /// Exactly zero.
    Neutral,
}

/// Point charge placed on the plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    /// Unique identifier.
    pub id: ChargeId,
    /// Position in canvas units.
    pub position: V2,
    /// Signed charge in microcoulombs (µC).
    pub magnitude: Scalar,
    /// Radius of the disc used for hit-testing.
    pub hit_radius: Scalar,
}

impl Charge {
    /// True when `point` lies strictly inside the hit disc.
    #[must_use]
    pub fn contains(&self, point: &V2) -> bool {
        (point - self.position).norm() < self.hit_radius
    }

    /// Charge converted to coulombs.
    #[must_use]
    pub fn coulombs(&self) -> Scalar {
        microcoulombs_to_coulombs(self.magnitude)
    }

    /// Sign classification of the magnitude.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        if self.magnitude > 0.0 {
            Polarity::Positive
        } else if self.magnitude < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// Entry of the ordered charge listing shown next to the canvas.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeListing {
    /// 1-based display number (store order).
    pub number: usize,
    /// Identifier of the listed charge.
    pub id: ChargeId,
    /// Signed charge in µC.
    pub magnitude: Scalar,
    /// Sign classification.
    pub polarity: Polarity,
    /// Human-readable label, e.g. `Charge 2 (-1.5 µC)`.
    pub label: String,
}

/// Owns the current set of point charges in insertion order.
#[derive(Debug, Clone)]
pub struct ChargeStore {
    charges: Vec<Charge>,
    next_id: u64,
    hit_radius: Scalar,
}

impl ChargeStore {
    /// Creates an empty store using [`DEFAULT_HIT_RADIUS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_hit_radius(DEFAULT_HIT_RADIUS)
    }

    /// Creates an empty store whose charges use `hit_radius` for hit-testing.
    #[must_use]
    pub fn with_hit_radius(hit_radius: Scalar) -> Self {
        Self {
            charges: Vec::new(),
            next_id: 1,
            hit_radius,
        }
    }

    /// Places a new charge and returns a copy of it.
    pub fn add(&mut self, position: V2, magnitude: Scalar) -> Charge {
        let charge = Charge {
            id: ChargeId(self.next_id),
            position,
            magnitude,
            hit_radius: self.hit_radius,
        };
        self.next_id += 1;
        self.charges.push(charge);
        charge
    }

    /// Removes every charge matching `predicate`, keeping the survivors' order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Charge>
    where
        F: FnMut(&Charge) -> bool,
    {
        let mut removed = Vec::new();
        self.charges.retain(|c| {
            if predicate(c) {
                removed.push(*c);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Removes every charge whose hit disc contains `point`.
    pub fn remove_at(&mut self, point: V2) -> Vec<Charge> {
        self.remove_where(|c| c.contains(&point))
    }

    /// Moves the charge `id` to `position`.
    pub fn move_to(&mut self, id: ChargeId, position: V2) -> Result<(), SandboxError> {
        let charge = self
            .charges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SandboxError::UnknownCharge(id))?;
        charge.position = position;
        Ok(())
    }

    /// Removes all charges. Identifiers keep increasing afterwards.
    pub fn clear(&mut self) {
        self.charges.clear();
    }

    /// All charges in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Charge] {
        &self.charges
    }

    /// Looks up a charge by id.
    #[must_use]
    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    /// 1-based display number of `id`.
    #[must_use]
    pub fn position_of(&self, id: ChargeId) -> Option<usize> {
        self.charges.iter().position(|c| c.id == id).map(|i| i + 1)
    }

    /// First charge, in store order, whose hit disc contains `point`.
    #[must_use]
    pub fn find_containing(&self, point: V2) -> Option<&Charge> {
        self.charges.iter().find(|c| c.contains(&point))
    }

    /// Ordered listing with stable per-charge numbering.
    #[must_use]
    pub fn listing(&self) -> Vec<ChargeListing> {
        self.charges
            .iter()
            .enumerate()
            .map(|(i, c)| ChargeListing {
                number: i + 1,
                id: c.id,
                magnitude: c.magnitude,
                polarity: c.polarity(),
                label: format!("Charge {} ({:.1} µC)", i + 1, c.magnitude),
            })
            .collect()
    }

    /// Number of charges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.charges.len()
    }

    /// True when the store holds no charges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }
}

impl Default for ChargeStore {
    fn default() -> Self {
        Self::new()
    }
}
