use crate::charges::Charge;
use crate::fields::FieldEvaluator;
use crate::math::{Bounds, Scalar, V2};

use super::StreamlineSegment;

/// Integration sense relative to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sense {
    /// Along E (away from positive charges).
    Forward,
    /// Against E.
    Backward,
}

impl Sense {
    fn sign(self) -> Scalar {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Stopping parameters shared by both directed traces.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Walk<'a> {
    pub field: &'a FieldEvaluator,
    pub charges: &'a [Charge],
    pub domain: &'a Bounds,
    pub step: Scalar,
    pub max_steps: usize,
    pub stop_distance: Scalar,
}

impl Walk<'_> {
    fn direction(&self, point: V2, sense: Sense) -> Option<V2> {
        let n = self.field.normalized_field_at(self.charges, point);
        n.is_defined().then(|| n.direction * sense.sign())
    }

    /// Midpoint RK2 step: slope at `p`, half step, slope there, full step.
    /// Returns the next point and the direction used, or `None` where the field vanishes.
    fn heun_step(&self, p: V2, sense: Sense) -> Option<(V2, V2)> {
        let d1 = self.direction(p, sense)?;
        let half = p + d1 * (self.step / 2.0);
        let d2 = self.direction(half, sense)?;
        Some((p + d2 * self.step, d2))
    }

    fn near_charge(&self, point: &V2) -> bool {
        self.charges
            .iter()
            .any(|c| (point - c.position).norm() < self.stop_distance)
    }

    /// Segments from `seed` in the given sense, in traversal order.
    pub fn trace(&self, seed: V2, sense: Sense) -> Vec<StreamlineSegment> {
        let mut segments = Vec::new();
        let mut p = seed;
        for _ in 0..self.max_steps {
            let Some((next, direction)) = self.heun_step(p, sense) else {
                break;
            };
            if !self.domain.contains(&next) || self.near_charge(&next) {
                break;
            }
            segments.push(StreamlineSegment { start: p, end: next, direction });
            p = next;
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::charges::ChargeStore;

    fn walk<'a>(field: &'a FieldEvaluator, charges: &'a [Charge], domain: &'a Bounds) -> Walk<'a> {
        Walk { field, charges, domain, step: 4.0, max_steps: 400, stop_distance: 8.0 }
    }

    #[test]
    fn forward_moves_away_from_positive_charge() {
        let mut store = ChargeStore::new();
        store.add(V2::new(100.0, 100.0), 1.0);
        let field = FieldEvaluator::default();
        let domain = Bounds::from_size(200.0, 200.0);
        let segs = walk(&field, store.all(), &domain).trace(V2::new(120.0, 100.0), Sense::Forward);
        assert!(!segs.is_empty());
        assert_relative_eq!(segs[0].direction, V2::new(1.0, 0.0), epsilon = 1.0e-12);
        assert_relative_eq!(segs[0].end, V2::new(124.0, 100.0), epsilon = 1.0e-9);
        // stops before the boundary at x = 200
        assert!(segs.last().unwrap().end.x <= 200.0);
        assert_eq!(segs.len(), 20);
    }

    #[test]
    fn backward_stops_near_charge() {
        let mut store = ChargeStore::new();
        store.add(V2::new(100.0, 100.0), 1.0);
        let field = FieldEvaluator::default();
        let domain = Bounds::from_size(200.0, 200.0);
        let segs = walk(&field, store.all(), &domain).trace(V2::new(140.0, 100.0), Sense::Backward);
        let last = segs.last().unwrap().end;
        let d = (last - V2::new(100.0, 100.0)).norm();
        assert!((8.0..12.0).contains(&d), "stopped at distance {d}");
        assert_relative_eq!(segs[0].direction, V2::new(-1.0, 0.0), epsilon = 1.0e-12);
    }

    #[test]
    fn no_charges_no_segments() {
        let field = FieldEvaluator::default();
        let domain = Bounds::from_size(200.0, 200.0);
        let segs = walk(&field, &[], &domain).trace(V2::new(50.0, 50.0), Sense::Forward);
        assert!(segs.is_empty());
    }
}
