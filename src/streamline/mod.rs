//! Field-line tracing by midpoint RK2 integration of the normalized field.
//!
//! Every seed on a regular lattice is traced forward (along E) and backward
//! (against E). The backward half is reversed and re-oriented so a streamline is
//! a single polyline running in the field direction, typically from a positive
//! charge towards a negative one or the domain edge. Lines reached from several
//! seeds are dropped by a coarse endpoint signature.

mod integrate;

use std::collections::HashSet;

use log::{debug, trace};

use crate::charges::Charge;
use crate::errors::SandboxError;
use crate::fields::FieldEvaluator;
use crate::math::{Bounds, Scalar, V2};

use integrate::{Sense, Walk};

/// Fixed numeric parameters of the tracer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerConfig {
    /// Pitch of the seed lattice.
    pub seed_spacing: Scalar,
    /// Integration step length `h`.
    pub step: Scalar,
    /// Step cap per directed trace.
    pub max_steps: usize,
    /// A trace stops before entering this distance of any charge.
    pub stop_distance: Scalar,
    /// Seeds within `hit_radius + seed_margin` of a charge are discarded.
    pub seed_margin: Scalar,
    /// Arc length between consecutive arrowheads.
    pub arrow_interval: Scalar,
    /// Endpoint rounding bucket for deduplication.
    pub dedup_bucket: Scalar,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            seed_spacing: 50.0,
            step: 4.0,
            max_steps: 400,
            stop_distance: 8.0,
            seed_margin: 4.0,
            arrow_interval: 80.0,
            dedup_bucket: 10.0,
        }
    }
}

impl TracerConfig {
    /// Checks that every length and count is positive.
    pub fn validate(&self) -> Result<(), SandboxError> {
        let positive = [
            ("seed_spacing", self.seed_spacing),
            ("step", self.step),
            ("arrow_interval", self.arrow_interval),
            ("dedup_bucket", self.dedup_bucket),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SandboxError::InvalidConfig(format!("tracer {name} must be positive, got {value}")));
            }
        }
        if self.stop_distance < 0.0 || self.seed_margin < 0.0 {
            return Err(SandboxError::InvalidConfig("tracer distances must be non-negative".into()));
        }
        if self.max_steps == 0 {
            return Err(SandboxError::InvalidConfig("tracer max_steps must be at least 1".into()));
        }
        Ok(())
    }
}

/// One integration step of a field line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamlineSegment {
    /// Start of the step.
    pub start: V2,
    /// End of the step.
    pub end: V2,
    /// Unit field direction used for the step (sampled at its midpoint).
    pub direction: V2,
}

impl StreamlineSegment {
    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> Scalar {
        (self.end - self.start).norm()
    }

    /// Same segment traversed the other way.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self { start: self.end, end: self.start, direction: -self.direction }
    }
}

/// Arrowhead placed along a rendered streamline.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    /// Tip position.
    pub position: V2,
    /// Unit direction the arrow points in.
    pub direction: V2,
}

/// Coarse endpoint fingerprint used to drop duplicate lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([i64; 4]);

/// Continuous field line oriented along E.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Streamline {
    /// Connected segments; `segments[i].end == segments[i + 1].start`.
    pub segments: Vec<StreamlineSegment>,
}

impl Streamline {
    /// Joins a backward trace (in traversal order) with a forward trace from the same seed.
    #[must_use]
    pub fn join(backward: Vec<StreamlineSegment>, forward: Vec<StreamlineSegment>) -> Self {
        let mut segments = Vec::with_capacity(backward.len() + forward.len());
        segments.extend(backward.iter().rev().map(StreamlineSegment::flipped));
        segments.extend(forward);
        Self { segments }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the line has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Upstream end of the line.
    #[must_use]
    pub fn first_point(&self) -> Option<V2> {
        self.segments.first().map(|s| s.start)
    }

    /// Downstream end of the line.
    #[must_use]
    pub fn last_point(&self) -> Option<V2> {
        self.segments.last().map(|s| s.end)
    }

    /// Polyline vertices, `len() + 1` of them for a non-empty line.
    #[must_use]
    pub fn points(&self) -> Vec<V2> {
        let mut pts: Vec<V2> = self.segments.iter().map(|s| s.start).collect();
        pts.extend(self.last_point());
        pts
    }

    /// Total arc length.
    #[must_use]
    pub fn arc_length(&self) -> Scalar {
        self.segments.iter().map(StreamlineSegment::length).sum()
    }

    /// Endpoints rounded to multiples of `bucket`.
    #[must_use]
    pub fn signature(&self, bucket: Scalar) -> Option<Signature> {
        let (a, b) = (self.first_point()?, self.last_point()?);
        let q = |v: Scalar| (v / bucket).round() as i64;
        Some(Signature([q(a.x), q(a.y), q(b.x), q(b.y)]))
    }

    /// Arrowheads every `interval` of accumulated arc length, at segment ends.
    #[must_use]
    pub fn arrowheads(&self, interval: Scalar) -> Vec<Arrowhead> {
        let mut out = Vec::new();
        let mut acc = 0.0;
        for seg in &self.segments {
            acc += seg.length();
            if acc >= interval {
                out.push(Arrowhead { position: seg.end, direction: seg.direction });
                acc = 0.0;
            }
        }
        out
    }
}

/// Traces field lines over a rectangular domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamlineTracer {
    /// Simulation domain; traces stop at its edge.
    pub domain: Bounds,
    /// Numeric parameters.
    pub config: TracerConfig,
    /// Field evaluator the tracer integrates.
    pub field: FieldEvaluator,
}

impl StreamlineTracer {
    /// Creates a tracer with the default field evaluator.
    #[must_use]
    pub fn new(domain: Bounds, config: TracerConfig) -> Self {
        Self { domain, config, field: FieldEvaluator::default() }
    }

    /// Replaces the field evaluator.
    #[must_use]
    pub fn with_field(mut self, field: FieldEvaluator) -> Self {
        self.field = field;
        self
    }

    /// Seed lattice with points on or near a charge removed.
    #[must_use]
    pub fn seeds(&self, charges: &[Charge]) -> Vec<V2> {
        self.domain
            .lattice(self.config.seed_spacing)
            .into_iter()
            .filter(|p| {
                charges
                    .iter()
                    .all(|c| (p - c.position).norm() >= c.hit_radius + self.config.seed_margin)
            })
            .collect()
    }

    /// Bidirectional streamline through `seed`.
    #[must_use]
    pub fn trace_from(&self, charges: &[Charge], seed: V2) -> Streamline {
        let walk = Walk {
            field: &self.field,
            charges,
            domain: &self.domain,
            step: self.config.step,
            max_steps: self.config.max_steps,
            stop_distance: self.config.stop_distance,
        };
        let forward = walk.trace(seed, Sense::Forward);
        let backward = walk.trace(seed, Sense::Backward);
        Streamline::join(backward, forward)
    }

    /// All distinct streamlines for the current charges, in seed order.
    #[must_use]
    pub fn trace_all(&self, charges: &[Charge]) -> Vec<Streamline> {
        if charges.is_empty() {
            return Vec::new();
        }
        let seeds = self.seeds(charges);
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for seed in &seeds {
            let line = self.trace_from(charges, *seed);
            let Some(signature) = line.signature(self.config.dedup_bucket) else {
                continue;
            };
            if !seen.insert(signature) {
                trace!("seed ({:.1}, {:.1}) duplicates an earlier line", seed.x, seed.y);
                continue;
            }
            trace!(
                "seed ({:.1}, {:.1}) -> {} segments, {:.1} units",
                seed.x,
                seed.y,
                line.len(),
                line.arc_length()
            );
            lines.push(line);
        }
        debug!(
            "traced {} streamlines from {} seeds over {} charges",
            lines.len(),
            seeds.len(),
            charges.len()
        );
        lines
    }
}
