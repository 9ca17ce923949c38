use crate::charges::{Charge, ChargeId, ChargeStore};
use crate::constants::COULOMB_CONSTANT;
use crate::errors::SandboxError;
use crate::math::Scalar;

/// Squared separation below which two charges are treated as coincident.
pub const MIN_SEPARATION_R2: Scalar = 1.0;

/// Magnitude of the Coulomb force between `a` and `b` in newtons.
///
/// Returns zero for (near-)coincident charges.
#[must_use]
pub fn force_between(a: &Charge, b: &Charge) -> Scalar {
    let r2 = (a.position - b.position).norm_squared();
    if r2 < MIN_SEPARATION_R2 {
        return 0.0;
    }
    COULOMB_CONSTANT * (a.coulombs() * b.coulombs()).abs() / r2
}

/// [`force_between`] for two charges looked up by id.
pub fn force_between_ids(store: &ChargeStore, a: ChargeId, b: ChargeId) -> Result<Scalar, SandboxError> {
    let ca = store.get(a).ok_or(SandboxError::UnknownCharge(a))?;
    let cb = store.get(b).ok_or(SandboxError::UnknownCharge(b))?;
    Ok(force_between(ca, cb))
}
