//! Two-slot selection backing the Coulomb force panel.
//!
//! Selected ids are kept in charge-listing order, not click order: the panel
//! reports the pair by display number and a third click evicts the selected
//! charge listed first.

use crate::charges::{ChargeId, ChargeStore};

/// Up to two selected charges, in store order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSelection {
    ids: Vec<ChargeId>,
}

impl PairSelection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id`, or deselects it if already selected. Selecting a third
    /// charge evicts the selected charge that comes first in `store`.
    /// Returns whether `id` ends up selected.
    pub fn toggle(&mut self, id: ChargeId, store: &ChargeStore) -> bool {
        if let Some(i) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(i);
            return false;
        }
        self.sort(store);
        if self.ids.len() == 2 {
            self.ids.remove(0);
        }
        self.ids.push(id);
        self.sort(store);
        true
    }

    fn sort(&mut self, store: &ChargeStore) {
        self.ids
            .sort_by_key(|id| store.position_of(*id).unwrap_or(usize::MAX));
    }

    /// Drops ids that no longer exist.
    pub fn retain<F>(&mut self, mut exists: F)
    where
        F: FnMut(ChargeId) -> bool,
    {
        self.ids.retain(|id| exists(*id));
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in store order.
    #[must_use]
    pub fn selected(&self) -> &[ChargeId] {
        &self.ids
    }

    /// The two selected ids in store order, when exactly two are selected.
    #[must_use]
    pub fn pair(&self) -> Option<(ChargeId, ChargeId)> {
        match self.ids.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}
