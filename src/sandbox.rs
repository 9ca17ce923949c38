//! Command dispatch and frame assembly for an interactive session.
//!
//! The input layer translates pointer and panel events into [`Command`]s; the
//! renderer asks for a [`Frame`] whenever it needs to redraw. Nothing is cached
//! between frames.

use log::{debug, warn};

use crate::charges::{Charge, ChargeId, ChargeListing, ChargeStore};
use crate::config::SandboxConfig;
use crate::errors::SandboxError;
use crate::fields::{analyze_gauss, force_between, FieldSample, GaussReport, GaussianSurface, GridArrow};
use crate::math::{Scalar, V2};
use crate::selection::PairSelection;
use crate::streamline::{Arrowhead, Streamline};

/// Parses user-typed charge input in µC.
pub fn parse_magnitude(input: &str) -> Result<Scalar, SandboxError> {
    let trimmed = input.trim();
    match trimmed.parse::<Scalar>() {
        Ok(q) if q.is_finite() => Ok(q),
        _ => Err(SandboxError::InvalidMagnitude(trimmed.to_owned())),
    }
}

/// Mutation or query requested by the input layer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Place a charge of `magnitude` µC at `position`.
    AddCharge {
        /// Where to place the charge.
        position: V2,
        /// Signed charge in µC.
        magnitude: Scalar,
    },
    /// Drag a charge to a new position.
    MoveCharge {
        /// Charge to move.
        id: ChargeId,
        /// New position.
        position: V2,
    },
    /// Delete every charge whose hit disc contains `point`.
    RemoveAt {
        /// Pointer position.
        point: V2,
    },
    /// Sample the field under the pointer.
    QueryPoint {
        /// Pointer position.
        point: V2,
    },
    /// Remove all charges.
    Clear,
    /// Toggle a charge in the force-panel selection.
    ToggleSelection {
        /// Charge clicked in the listing.
        id: ChargeId,
    },
    /// Show, move, or hide the Gaussian surface.
    SetGaussianSurface(Option<GaussianSurface>),
}

impl Command {
    /// `AddCharge` from textual magnitude input.
    pub fn add_from_input(position: V2, input: &str) -> Result<Self, SandboxError> {
        let magnitude = parse_magnitude(input)?;
        Ok(Self::AddCharge { position, magnitude })
    }
}

/// Result of an applied [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A charge was placed.
    Added(Charge),
    /// A charge was repositioned.
    Moved(ChargeId),
    /// Charges removed by a hit-test (possibly none).
    Removed(Vec<Charge>),
    /// Field under the pointer.
    Sample(FieldSample),
    /// Number of charges removed by a reset.
    Cleared(usize),
    /// New selection state of the toggled charge.
    Selection {
        /// Toggled charge.
        id: ChargeId,
        /// Whether it is now selected.
        selected: bool,
    },
    /// The Gaussian surface changed.
    SurfaceChanged,
}

/// Force between the two selected charges.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombReport {
    /// Selected charge listed first, with its display number.
    pub first: (ChargeId, usize),
    /// Selected charge listed second, with its display number.
    pub second: (ChargeId, usize),
    /// Force magnitude in newtons.
    pub force: Scalar,
}

/// Status panel contents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    /// Ordered charge listing.
    pub charges: Vec<ChargeListing>,
    /// Present when a Gaussian surface is shown.
    pub gauss: Option<GaussReport>,
    /// Present when exactly two charges are selected.
    pub coulomb: Option<CoulombReport>,
}

/// Streamline together with its arrowheads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStreamline {
    /// Field-line geometry.
    pub line: Streamline,
    /// Arrowheads at even arc-length intervals.
    pub arrowheads: Vec<Arrowhead>,
}

/// Everything the renderer draws for one redraw.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Background field arrows.
    pub arrows: Vec<GridArrow>,
    /// Deduplicated field lines.
    pub streamlines: Vec<RenderedStreamline>,
    /// Status panel.
    pub panel: InfoPanel,
}

/// Owns the charges, the selection, and the Gaussian surface of one session.
#[derive(Debug, Clone)]
pub struct Sandbox {
    config: SandboxConfig,
    store: ChargeStore,
    selection: PairSelection,
    surface: Option<GaussianSurface>,
}

impl Sandbox {
    /// Creates an empty session after validating `config`.
    pub fn new(config: SandboxConfig) -> Result<Self, SandboxError> {
        config.validate()?;
        Ok(Self {
            store: ChargeStore::with_hit_radius(config.hit_radius),
            config,
            selection: PairSelection::new(),
            surface: None,
        })
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Current charges.
    #[must_use]
    pub fn store(&self) -> &ChargeStore {
        &self.store
    }

    /// Current force-panel selection.
    #[must_use]
    pub fn selection(&self) -> &PairSelection {
        &self.selection
    }

    /// Gaussian surface, when shown.
    #[must_use]
    pub fn surface(&self) -> Option<&GaussianSurface> {
        self.surface.as_ref()
    }

    /// Applies one command. Rejected commands leave the session unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, SandboxError> {
        debug!("apply {command:?}");
        match command {
            Command::AddCharge { position, magnitude } => {
                if !magnitude.is_finite() {
                    warn!("rejected non-finite charge {magnitude}");
                    return Err(SandboxError::NonFiniteMagnitude(magnitude));
                }
                Ok(Outcome::Added(self.store.add(position, magnitude)))
            }
            Command::MoveCharge { id, position } => {
                self.store.move_to(id, position)?;
                Ok(Outcome::Moved(id))
            }
            Command::RemoveAt { point } => {
                let removed = self.store.remove_at(point);
                let store = &self.store;
                self.selection.retain(|id| store.get(id).is_some());
                Ok(Outcome::Removed(removed))
            }
            Command::QueryPoint { point } => Ok(Outcome::Sample(self.sample(point))),
            Command::Clear => {
                let n = self.store.len();
                self.store.clear();
                self.selection.clear();
                Ok(Outcome::Cleared(n))
            }
            Command::ToggleSelection { id } => {
                if self.store.get(id).is_none() {
                    warn!("selection of unknown charge {id}");
                    return Err(SandboxError::UnknownCharge(id));
                }
                let selected = self.selection.toggle(id, &self.store);
                Ok(Outcome::Selection { id, selected })
            }
            Command::SetGaussianSurface(surface) => {
                self.surface = surface;
                Ok(Outcome::SurfaceChanged)
            }
        }
    }

    /// Field at `point`.
    #[must_use]
    pub fn sample(&self, point: V2) -> FieldSample {
        self.config.field.sample(self.store.all(), point)
    }

    /// Field lines for the current charges.
    #[must_use]
    pub fn streamlines(&self) -> Vec<Streamline> {
        self.config.tracer().trace_all(self.store.all())
    }

    /// Status panel for the current state.
    #[must_use]
    pub fn panel(&self) -> InfoPanel {
        let charges = self.store.all();
        let gauss = self.surface.as_ref().map(|s| analyze_gauss(charges, s));
        let coulomb = self.selection.pair().and_then(|(a, b)| {
            let (ca, cb) = (self.store.get(a)?, self.store.get(b)?);
            Some(CoulombReport {
                first: (a, self.store.position_of(a)?),
                second: (b, self.store.position_of(b)?),
                force: force_between(ca, cb),
            })
        });
        InfoPanel { charges: self.store.listing(), gauss, coulomb }
    }

    /// Recomputes everything the renderer needs.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let charges = self.store.all();
        let arrows = self.config.field.sample_grid(charges, &self.config.domain, &self.config.grid);
        let interval = self.config.tracer.arrow_interval;
        let streamlines: Vec<_> = self
            .streamlines()
            .into_iter()
            .map(|line| RenderedStreamline { arrowheads: line.arrowheads(interval), line })
            .collect();
        debug!(
            "frame: {} charges, {} grid arrows, {} streamlines",
            charges.len(),
            arrows.len(),
            streamlines.len()
        );
        Frame { arrows, streamlines, panel: self.panel() }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self {
            config: SandboxConfig::default(),
            store: ChargeStore::new(),
            selection: PairSelection::new(),
            surface: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::VACUUM_PERMITTIVITY;

    fn add(sandbox: &mut Sandbox, x: Scalar, y: Scalar, q: Scalar) -> Charge {
        match sandbox.apply(Command::AddCharge { position: V2::new(x, y), magnitude: q }).unwrap() {
            Outcome::Added(c) => c,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_magnitude(" -2.5 "), Ok(-2.5));
        assert_eq!(parse_magnitude("abc"), Err(SandboxError::InvalidMagnitude("abc".into())));
        assert!(parse_magnitude("NaN").is_err());
        assert!(parse_magnitude("inf").is_err());
        assert!(Command::add_from_input(V2::zeros(), "").is_err());
    }

    #[test]
    fn non_finite_add_changes_nothing() {
        let mut sandbox = Sandbox::default();
        let err = sandbox.apply(Command::AddCharge { position: V2::zeros(), magnitude: Scalar::NAN });
        assert!(matches!(err, Err(SandboxError::NonFiniteMagnitude(_))));
        assert!(sandbox.store().is_empty());
    }

    #[test]
    fn coulomb_panel_needs_two_selected() {
        let mut sandbox = Sandbox::default();
        let a = add(&mut sandbox, 0.0, 0.0, 1.0);
        let _ = add(&mut sandbox, 50.0, 50.0, 3.0);
        let c = add(&mut sandbox, 100.0, 0.0, -1.0);
        sandbox.apply(Command::ToggleSelection { id: a.id }).unwrap();
        assert!(sandbox.panel().coulomb.is_none());
        sandbox.apply(Command::ToggleSelection { id: c.id }).unwrap();
        let report = sandbox.panel().coulomb.unwrap();
        assert_eq!(report.first, (a.id, 1));
        assert_eq!(report.second, (c.id, 3));
        assert_relative_eq!(report.force, 8.98755e-7, max_relative = 1.0e-5);
    }

    #[test]
    fn coulomb_report_uses_listing_order() {
        let mut sandbox = Sandbox::default();
        let a = add(&mut sandbox, 0.0, 0.0, 1.0);
        let b = add(&mut sandbox, 50.0, 50.0, 3.0);
        let c = add(&mut sandbox, 100.0, 0.0, -1.0);
        sandbox.apply(Command::ToggleSelection { id: c.id }).unwrap();
        sandbox.apply(Command::ToggleSelection { id: a.id }).unwrap();
        let report = sandbox.panel().coulomb.unwrap();
        assert_eq!(report.first, (a.id, 1));
        assert_eq!(report.second, (c.id, 3));

        sandbox.apply(Command::ToggleSelection { id: b.id }).unwrap();
        assert_eq!(sandbox.selection().selected(), &[b.id, c.id]);
        let report = sandbox.panel().coulomb.unwrap();
        assert_eq!((report.first.1, report.second.1), (2, 3));
    }

    #[test]
    fn removing_a_selected_charge_clears_the_report() {
        let mut sandbox = Sandbox::default();
        let a = add(&mut sandbox, 100.0, 100.0, 1.0);
        let b = add(&mut sandbox, 300.0, 100.0, 1.0);
        sandbox.apply(Command::ToggleSelection { id: a.id }).unwrap();
        sandbox.apply(Command::ToggleSelection { id: b.id }).unwrap();
        let outcome = sandbox.apply(Command::RemoveAt { point: V2::new(302.0, 101.0) }).unwrap();
        assert_eq!(outcome, Outcome::Removed(vec![b]));
        assert_eq!(sandbox.selection().selected(), &[a.id]);
        assert!(sandbox.panel().coulomb.is_none());
    }

    #[test]
    fn gauss_report_follows_surface() {
        let mut sandbox = Sandbox::default();
        add(&mut sandbox, 400.0, 300.0, 2.0);
        add(&mut sandbox, 700.0, 300.0, 5.0);
        assert!(sandbox.panel().gauss.is_none());
        let surface = GaussianSurface::new(V2::new(400.0, 300.0), 100.0);
        sandbox.apply(Command::SetGaussianSurface(Some(surface))).unwrap();
        let report = sandbox.panel().gauss.unwrap();
        assert_relative_eq!(report.enclosed, 2.0);
        assert_relative_eq!(report.flux, 2.0e-6 / VACUUM_PERMITTIVITY, max_relative = 1.0e-12);
    }

    #[test]
    fn drag_moves_and_query_samples() {
        let mut sandbox = Sandbox::default();
        let a = add(&mut sandbox, 100.0, 100.0, 2.0);
        sandbox.apply(Command::MoveCharge { id: a.id, position: V2::new(100.0, 200.0) }).unwrap();
        let Outcome::Sample(s) = sandbox.apply(Command::QueryPoint { point: V2::new(100.0, 300.0) }).unwrap() else {
            panic!("expected a sample");
        };
        assert!(s.vector.y > 0.0);
        assert_relative_eq!(s.vector.x, 0.0, epsilon = 1.0e-9);
        assert!(sandbox.apply(Command::MoveCharge { id: ChargeId(99), position: V2::zeros() }).is_err());
    }

    #[test]
    fn clear_empties_frame() {
        let mut sandbox = Sandbox::default();
        add(&mut sandbox, 100.0, 100.0, 1.0);
        add(&mut sandbox, 300.0, 100.0, -1.0);
        let frame = sandbox.frame();
        assert!(!frame.arrows.is_empty());
        assert!(!frame.streamlines.is_empty());
        assert_eq!(frame.panel.charges.len(), 2);
        assert_eq!(sandbox.apply(Command::Clear).unwrap(), Outcome::Cleared(2));
        let frame = sandbox.frame();
        assert!(frame.arrows.is_empty());
        assert!(frame.streamlines.is_empty());
        assert!(frame.panel.charges.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SandboxConfig::default();
        config.tracer.max_steps = 0;
        assert!(Sandbox::new(config).is_err());
        assert!(Sandbox::new(SandboxConfig::default()).is_ok());
    }
}
